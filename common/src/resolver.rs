//! 属性解決ロジック
//!
//! 信頼度付きラベル列から、衣料品種別・色・スタイルの最良候補1件ずつと
//! ディテール語の集合を求める。
//!
//! ## 処理フロー
//! 1. ノイズラベルを除外（表示にも残さない）
//! 2. ラベルを先頭から1回だけ走査し、属性ごとのルール表を順に適用
//! 3. 衣料品種別が空なら全ラベルを部分一致で補助走査
//! 4. 空のままの属性にはセンチネルを入れる
//!
//! ルール表の各行は検出方法・上書きポリシー・信頼度の減衰率を持つ。
//! 完全一致は「より高い信頼度なら置換」、部分一致と親カテゴリは
//! 「空のときだけ埋める」ので、弱い推定が直接の検出を押しのけることはない。

use crate::catalog::{Catalog, VocabEntry, Vocabulary};
use crate::descriptors::DescriptorSet;
use crate::types::{round_to, AttributeCandidate, Audience, Label, LabelView, Strategy};
use serde::{Deserialize, Serialize};

/// 衣料品種別のセンチネル（unclassified garment）
pub const GARMENT_SENTINEL: (&str, &str) = ("Clothing", "Prenda no identificada");

/// 色のセンチネル（not detected）
pub const COLOR_SENTINEL: (&str, &str) = ("Unknown", "No detectado");

/// スタイルのデフォルト
pub const STYLE_DEFAULT: (&str, &str) = ("Casual", "Casual");

/// 補助走査で見つかった衣料品種別に付ける信頼度
pub const SECONDARY_SCAN_CONFIDENCE: f64 = 50.0;

/// 既存候補に対する上書きポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// 空なら埋め、既存より厳密に高い信頼度なら置き換える
    ReplaceIfGreater,
    /// 空のときだけ埋める
    FillIfEmpty,
}

/// ルール表の1行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyRule {
    pub strategy: Strategy,
    pub policy: OverwritePolicy,
    /// ラベル信頼度に掛ける係数
    pub penalty: f64,
}

impl StrategyRule {
    const fn new(strategy: Strategy, policy: OverwritePolicy, penalty: f64) -> Self {
        Self { strategy, policy, penalty }
    }
}

pub const GARMENT_RULES: &[StrategyRule] = &[StrategyRule::new(
    Strategy::ExactName,
    OverwritePolicy::ReplaceIfGreater,
    1.0,
)];

pub const COLOR_RULES: &[StrategyRule] = &[
    StrategyRule::new(Strategy::ExactName, OverwritePolicy::ReplaceIfGreater, 1.0),
    StrategyRule::new(Strategy::NameSubstring, OverwritePolicy::FillIfEmpty, 0.9),
    StrategyRule::new(Strategy::ParentName, OverwritePolicy::FillIfEmpty, 0.85),
];

pub const STYLE_RULES: &[StrategyRule] = &[
    StrategyRule::new(Strategy::ExactName, OverwritePolicy::ReplaceIfGreater, 1.0),
    StrategyRule::new(Strategy::NameSubstring, OverwritePolicy::FillIfEmpty, 0.85),
];

/// 属性1つ分のスロット
#[derive(Debug, Clone, Default)]
pub struct AttributeSlot {
    candidate: Option<AttributeCandidate>,
}

impl AttributeSlot {
    pub fn is_filled(&self) -> bool {
        self.candidate.is_some()
    }

    pub fn candidate(&self) -> Option<&AttributeCandidate> {
        self.candidate.as_ref()
    }

    /// ポリシーに従って候補を受け入れる。受け入れたら true
    pub fn offer(&mut self, candidate: AttributeCandidate, policy: OverwritePolicy) -> bool {
        let accept = match (&self.candidate, policy) {
            (None, _) => true,
            (Some(current), OverwritePolicy::ReplaceIfGreater) => {
                candidate.confidence > current.confidence
            }
            (Some(_), OverwritePolicy::FillIfEmpty) => false,
        };
        if accept {
            self.candidate = Some(candidate);
        }
        accept
    }

    /// ルール表を順に適用する
    ///
    /// `FillIfEmpty` の行はスロットが埋まっていれば試さない。
    pub fn apply_rules(&mut self, rules: &[StrategyRule], label: &Label, vocabulary: &Vocabulary) {
        let confidence = label.clamped_confidence();
        for rule in rules {
            if rule.policy == OverwritePolicy::FillIfEmpty && self.is_filled() {
                continue;
            }
            if let Some(entry) = detect(rule.strategy, label, vocabulary) {
                self.offer(
                    AttributeCandidate::detected(
                        &entry.code,
                        &entry.display,
                        confidence * rule.penalty,
                        rule.strategy,
                    ),
                    rule.policy,
                );
            }
        }
    }

    /// 確定（空ならセンチネル）
    pub fn finish(self, sentinel: (&str, &str)) -> AttributeCandidate {
        self.candidate
            .unwrap_or_else(|| AttributeCandidate::sentinel(sentinel.0, sentinel.1))
    }
}

/// 検出方法ごとの語彙照合
fn detect<'v>(strategy: Strategy, label: &Label, vocabulary: &'v Vocabulary) -> Option<&'v VocabEntry> {
    match strategy {
        Strategy::ExactName => vocabulary.exact(&label.name),
        // 別の（より長い）ラベル名に含まれる語のみ
        Strategy::NameSubstring => vocabulary
            .longest_within(&label.name)
            .filter(|entry| !entry.code.eq_ignore_ascii_case(label.name.trim())),
        Strategy::ParentName => label
            .parent_names
            .iter()
            .find_map(|parent| vocabulary.exact(parent)),
        Strategy::SecondaryScan => vocabulary.longest_within(&label.name),
    }
}

/// 解決結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub garment: AttributeCandidate,
    pub color: AttributeCandidate,
    pub style: AttributeCandidate,
    pub descriptors: DescriptorSet,
    /// ノイズ除去済みの表示用ラベル（検出順）
    pub labels: Vec<LabelView>,
}

/// ラベル列から属性を解決する
///
/// # Arguments
/// * `labels` - ラベル検出サービスの出力（順序はそのまま走査順になる）
/// * `audience` - 衣料品種別の語彙を選ぶ対象
/// * `catalog` - 参照カタログ
///
/// # Returns
/// 各属性に必ず1候補を持つ解決結果
pub fn resolve_attributes(labels: &[Label], audience: Audience, catalog: &Catalog) -> Resolution {
    let garments = catalog.garments(audience);

    let mut garment = AttributeSlot::default();
    let mut color = AttributeSlot::default();
    let mut style = AttributeSlot::default();
    let mut descriptors = DescriptorSet::new();
    let mut retained: Vec<&Label> = Vec::new();

    for label in labels {
        if catalog.is_noise(&label.name) {
            continue;
        }
        retained.push(label);

        garment.apply_rules(GARMENT_RULES, label, garments);
        color.apply_rules(COLOR_RULES, label, catalog.colors());
        style.apply_rules(STYLE_RULES, label, catalog.styles());

        let descriptor = catalog
            .descriptor_exact(&label.name)
            .or_else(|| catalog.descriptor_within(&label.name));
        if let Some(entry) = descriptor {
            descriptors.insert(&entry.code, entry.kind);
        }
    }

    // 複合名（例: "Floral Dress"）からの補助走査
    if !garment.is_filled() {
        for label in &retained {
            if let Some(entry) = detect(Strategy::SecondaryScan, label, garments) {
                garment.offer(
                    AttributeCandidate::detected(
                        &entry.code,
                        &entry.display,
                        SECONDARY_SCAN_CONFIDENCE,
                        Strategy::SecondaryScan,
                    ),
                    OverwritePolicy::FillIfEmpty,
                );
                break;
            }
        }
    }

    let labels = retained
        .iter()
        .map(|label| LabelView {
            name: label.name.clone(),
            confidence: round_to(label.clamped_confidence(), 1),
        })
        .collect();

    Resolution {
        garment: garment.finish(GARMENT_SENTINEL),
        color: color.finish(COLOR_SENTINEL),
        style: style.finish(STYLE_DEFAULT),
        descriptors,
        labels,
    }
}
