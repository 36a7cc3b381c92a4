//! 解析結果の型定義
//!
//! CLIとHTTPサーバーで共有される型:
//! - Label: ラベル検出サービスの出力
//! - Audience: 利用者が指定する対象（hombre / mujer）
//! - AttributeCandidate: 属性ごとに解決された1候補

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ラベル検出サービスが返すタグ1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub name: String,
    /// 0〜100 の信頼度
    pub confidence: f64,
    /// 上位カテゴリ名（検出サービスの並び順のまま）
    pub parent_names: Vec<String>,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
            parent_names: Vec::new(),
        }
    }

    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parent_names = parents.iter().map(|p| p.to_string()).collect();
        self
    }

    /// [0, 100] に丸めた信頼度（NaNは0）
    pub fn clamped_confidence(&self) -> f64 {
        if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 100.0)
        }
    }
}

/// 対象（衣料品の語彙と検索語を切り替える）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    #[serde(rename = "hombre")]
    Men,
    #[serde(rename = "mujer")]
    Women,
}

impl Audience {
    /// 受け付ける値
    pub const ACCEPTED: [&'static str; 2] = ["hombre", "mujer"];

    /// リクエスト・ストレージキーで使う値
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Men => "hombre",
            Audience::Women => "mujer",
        }
    }

    /// 検索クエリに入れる語
    pub fn query_term(&self) -> &'static str {
        match self {
            Audience::Men => "men",
            Audience::Women => "women",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Audience {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hombre" => Ok(Audience::Men),
            "mujer" => Ok(Audience::Women),
            other => Err(crate::Error::Parse(format!(
                "genero debe ser 'hombre' o 'mujer' (recibido: '{}')",
                other
            ))),
        }
    }
}

/// 候補を生んだ検出方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// ラベル名と語彙の完全一致
    ExactName,
    /// 別の（より長い）ラベル名に語彙が含まれる
    NameSubstring,
    /// ラベルの上位カテゴリ名に語彙がある
    ParentName,
    /// 全ラベルを走査する補助パス
    SecondaryScan,
}

/// 候補の出自
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Detected(Strategy),
    /// 検出できなかったときのセンチネル
    Default,
}

/// 属性1つ分の解決結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeCandidate {
    /// 語彙のキー（英語）
    pub code: String,
    /// ローカライズ表示（スペイン語）
    pub display: String,
    pub confidence: f64,
    pub origin: Origin,
}

impl AttributeCandidate {
    pub fn detected(code: &str, display: &str, confidence: f64, strategy: Strategy) -> Self {
        Self {
            code: code.to_string(),
            display: display.to_string(),
            confidence,
            origin: Origin::Detected(strategy),
        }
    }

    pub fn sentinel(code: &str, display: &str) -> Self {
        Self {
            code: code.to_string(),
            display: display.to_string(),
            confidence: 0.0,
            origin: Origin::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        self.origin == Origin::Default
    }

    /// 小数1桁に丸めた信頼度
    pub fn rounded_confidence(&self) -> f64 {
        round_to(self.confidence, 1)
    }
}

/// 表示用ラベル（ノイズ除去済み）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelView {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "confianza")]
    pub confidence: f64,
}

/// 小数点以下 `digits` 桁に丸める
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
