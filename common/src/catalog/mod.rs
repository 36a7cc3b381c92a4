//! カタログモジュール
//!
//! 検出ラベルの語彙を、ローカライズされた衣料品種別・色・スタイル・
//! ディテールに対応付ける参照データ。プロセス起動時に一度だけ構築し、
//! 以降は読み取り専用で共有する。
//!
//! JSONファイルから一部のテーブルだけ差し替えることもできる
//! （指定のないテーブルは組み込みデータのまま）。

mod builtin;

use crate::error::Result;
use crate::types::Audience;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 推定素材のデフォルト（mixed textile）
pub const DEFAULT_MATERIAL: &str = "Textil mixto";

/// 推定価格帯のデフォルト
pub const DEFAULT_PRICE_BAND: PriceBand = PriceBand { min: 50, max: 300 };

/// 着用シーン等を引くときのデフォルトスタイル表示名
pub const DEFAULT_STYLE_DISPLAY: &str = "Casual";

/// ディテール語の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    Material,
    Pattern,
    Fit,
    Detail,
    Accessory,
}

/// 部分一致の対象になる語を持つエントリ
pub trait Term {
    fn term(&self) -> &str;
}

/// 語彙1件（コード → 表示名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub code: String,
    pub display: String,
}

impl Term for VocabEntry {
    fn term(&self) -> &str {
        &self.code
    }
}

/// ディテール語彙1件（ラベル語 → 正規コード）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorEntry {
    pub term: String,
    pub code: String,
    pub kind: DescriptorKind,
}

impl Term for DescriptorEntry {
    fn term(&self) -> &str {
        &self.term
    }
}

/// 順序付き語彙（大文字小文字を区別しない完全一致インデックス付き）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<VocabEntry>", into = "Vec<VocabEntry>")]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
    index: HashMap<String, usize>,
}

impl From<Vec<VocabEntry>> for Vocabulary {
    fn from(entries: Vec<VocabEntry>) -> Self {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            // 同じコードが重複したら先勝ち
            index.entry(entry.code.to_lowercase()).or_insert(i);
        }
        Self { entries, index }
    }
}

impl From<Vocabulary> for Vec<VocabEntry> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.entries
    }
}

impl Vocabulary {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs
            .iter()
            .map(|(code, display)| VocabEntry {
                code: code.to_string(),
                display: display.to_string(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// 完全一致（大文字小文字は無視）
    pub fn exact(&self, name: &str) -> Option<&VocabEntry> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// `text` に部分一致する語彙のうち最長のもの
    pub fn longest_within(&self, text: &str) -> Option<&VocabEntry> {
        longest_match(&self.entries, text)
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 推定価格帯（PEN）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: u32,
    pub max: u32,
}

/// 既知ストア（ソース名に含まれる断片で判定）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub fragment: String,
    /// リマに実店舗があるか
    pub physical: bool,
    pub location: String,
}

/// 代替リスト用のストア
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackStore {
    pub name: String,
    pub link: String,
}

/// JSONで差し替え可能なテーブル（省略時は組み込みのまま）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogOverrides {
    garments_men: Option<Vocabulary>,
    garments_women: Option<Vocabulary>,
    colors: Option<Vocabulary>,
    styles: Option<Vocabulary>,
    descriptors: Option<Vec<DescriptorEntry>>,
    materials: Option<HashMap<String, String>>,
    price_bands: Option<HashMap<String, PriceBand>>,
    occasions: Option<HashMap<String, Vec<String>>>,
    when_to_wear: Option<HashMap<String, String>>,
    noise: Option<Vec<String>>,
    known_stores: Option<Vec<StoreEntry>>,
    fallback_stores: Option<Vec<FallbackStore>>,
}

/// 参照カタログ全体
#[derive(Debug, Clone)]
pub struct Catalog {
    garments_men: Vocabulary,
    garments_women: Vocabulary,
    colors: Vocabulary,
    styles: Vocabulary,
    descriptors: Vec<DescriptorEntry>,
    materials: HashMap<String, String>,
    price_bands: HashMap<String, PriceBand>,
    occasions: HashMap<String, Vec<String>>,
    when_to_wear: HashMap<String, String>,
    /// 小文字で保持
    noise: HashSet<String>,
    known_stores: Vec<StoreEntry>,
    fallback_stores: Vec<FallbackStore>,
}

lazy_static::lazy_static! {
    static ref BUILTIN: Catalog = Catalog::build_builtin();
}

impl Catalog {
    /// 組み込みカタログ（プロセス内で一度だけ構築）
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// JSON文字列から読み込み（指定されたテーブルのみ差し替え）
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: CatalogOverrides = serde_json::from_str(json)?;
        Ok(Self::builtin().clone().with_overrides(overrides))
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn build_builtin() -> Self {
        Self {
            garments_men: Vocabulary::from_pairs(builtin::GARMENTS_MEN),
            garments_women: Vocabulary::from_pairs(builtin::GARMENTS_WOMEN),
            colors: Vocabulary::from_pairs(builtin::COLORS),
            styles: Vocabulary::from_pairs(builtin::STYLES),
            descriptors: builtin::DESCRIPTORS
                .iter()
                .map(|(term, code, kind)| DescriptorEntry {
                    term: term.to_string(),
                    code: code.to_string(),
                    kind: *kind,
                })
                .collect(),
            materials: builtin::MATERIALS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            price_bands: builtin::PRICE_BANDS
                .iter()
                .map(|(k, min, max)| (k.to_string(), PriceBand { min: *min, max: *max }))
                .collect(),
            occasions: builtin::OCCASIONS
                .iter()
                .map(|(k, list)| (k.to_string(), list.iter().map(|s| s.to_string()).collect()))
                .collect(),
            when_to_wear: builtin::WHEN_TO_WEAR
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            noise: builtin::NOISE.iter().map(|n| n.to_lowercase()).collect(),
            known_stores: builtin::KNOWN_STORES
                .iter()
                .map(|(fragment, physical, location)| StoreEntry {
                    fragment: fragment.to_string(),
                    physical: *physical,
                    location: location.to_string(),
                })
                .collect(),
            fallback_stores: builtin::FALLBACK_STORES
                .iter()
                .map(|(name, link)| FallbackStore {
                    name: name.to_string(),
                    link: link.to_string(),
                })
                .collect(),
        }
    }

    fn with_overrides(mut self, o: CatalogOverrides) -> Self {
        if let Some(v) = o.garments_men {
            self.garments_men = v;
        }
        if let Some(v) = o.garments_women {
            self.garments_women = v;
        }
        if let Some(v) = o.colors {
            self.colors = v;
        }
        if let Some(v) = o.styles {
            self.styles = v;
        }
        if let Some(v) = o.descriptors {
            self.descriptors = v;
        }
        if let Some(v) = o.materials {
            self.materials = v;
        }
        if let Some(v) = o.price_bands {
            self.price_bands = v;
        }
        if let Some(v) = o.occasions {
            self.occasions = v;
        }
        if let Some(v) = o.when_to_wear {
            self.when_to_wear = v;
        }
        if let Some(v) = o.noise {
            self.noise = v.iter().map(|n| n.to_lowercase()).collect();
        }
        if let Some(v) = o.known_stores {
            self.known_stores = v;
        }
        if let Some(v) = o.fallback_stores {
            self.fallback_stores = v;
        }
        self
    }

    /// 対象別の衣料品種別語彙
    pub fn garments(&self, audience: Audience) -> &Vocabulary {
        match audience {
            Audience::Men => &self.garments_men,
            Audience::Women => &self.garments_women,
        }
    }

    pub fn colors(&self) -> &Vocabulary {
        &self.colors
    }

    pub fn styles(&self) -> &Vocabulary {
        &self.styles
    }

    /// ディテール語の完全一致
    pub fn descriptor_exact(&self, name: &str) -> Option<&DescriptorEntry> {
        let name = name.trim();
        self.descriptors
            .iter()
            .find(|d| d.term.eq_ignore_ascii_case(name))
    }

    /// ディテール語の部分一致（最長）
    pub fn descriptor_within(&self, text: &str) -> Option<&DescriptorEntry> {
        longest_match(&self.descriptors, text)
    }

    pub fn is_noise(&self, name: &str) -> bool {
        self.noise.contains(&name.trim().to_lowercase())
    }

    /// 衣料品コードから推定素材
    pub fn material_for(&self, garment_code: &str) -> &str {
        self.materials
            .get(garment_code)
            .map(String::as_str)
            .unwrap_or(DEFAULT_MATERIAL)
    }

    /// 衣料品コードから推定価格帯
    pub fn price_band_for(&self, garment_code: &str) -> PriceBand {
        self.price_bands
            .get(garment_code)
            .copied()
            .unwrap_or(DEFAULT_PRICE_BAND)
    }

    /// スタイル表示名から着用シーン（なければCasualのもの）
    pub fn occasions_for(&self, style_display: &str) -> &[String] {
        self.occasions
            .get(style_display)
            .or_else(|| self.occasions.get(DEFAULT_STYLE_DISPLAY))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// スタイル表示名から「いつ着るか」（なければCasualのもの）
    pub fn when_to_wear_for(&self, style_display: &str) -> &str {
        self.when_to_wear
            .get(style_display)
            .or_else(|| self.when_to_wear.get(DEFAULT_STYLE_DISPLAY))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// ソース名から既知ストアを探す
    pub fn store_for(&self, source_name: &str) -> Option<&StoreEntry> {
        let source = source_name.to_lowercase();
        self.known_stores
            .iter()
            .find(|s| source.contains(&s.fragment.to_lowercase()))
    }

    pub fn fallback_stores(&self) -> &[FallbackStore] {
        &self.fallback_stores
    }
}

/// `term` が `text` に部分文字列として含まれるか（大文字小文字は無視）
///
/// 語境界は見ない。"Minidress" は "dress" を含む。
pub fn contains_term(text: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    !term.is_empty() && text.to_lowercase().contains(&term)
}

/// 部分一致（最長マッチ）。同じ長さなら先に並んでいる方
fn longest_match<'a, T: Term>(entries: &'a [T], text: &str) -> Option<&'a T> {
    let mut best: Option<&'a T> = None;
    for entry in entries {
        if !contains_term(text, entry.term()) {
            continue;
        }
        let longer = match best {
            None => true,
            Some(current) => entry.term().chars().count() > current.term().chars().count(),
        };
        if longer {
            best = Some(entry);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_plain_substring() {
        assert!(contains_term("Black Jacket", "black"));
        assert!(contains_term("T-Shirt", "shirt"));
        assert!(contains_term("Minidress", "Dress"));
        assert!(contains_term("Reddish", "red"));
        assert!(contains_term("Zippered Jacket", "zipper"));
        assert!(!contains_term("Jacket", "coat"));
        assert!(!contains_term("Jacket", ""));
    }

    #[test]
    fn test_vocabulary_exact_ignores_case() {
        let catalog = Catalog::builtin();
        let entry = catalog.colors().exact("black").expect("Blackが見つからない");
        assert_eq!(entry.code, "Black");
        assert_eq!(entry.display, "Negro");
        assert!(catalog.colors().exact("Blackish").is_none());
    }

    #[test]
    fn test_vocabulary_longest_within() {
        let catalog = Catalog::builtin();
        let men = catalog.garments(Audience::Men);
        assert_eq!(men.longest_within("Striped Polo Shirt").unwrap().code, "Polo Shirt");
        assert_eq!(men.longest_within("Denim T-Shirt").unwrap().code, "T-Shirt");
        assert!(men.longest_within("Handbag").is_none());
    }

    #[test]
    fn test_garments_by_audience() {
        let catalog = Catalog::builtin();
        assert!(catalog.garments(Audience::Women).exact("Dress").is_some());
        assert!(catalog.garments(Audience::Men).exact("Dress").is_none());
        assert!(catalog.garments(Audience::Men).exact("Suit").is_some());
    }

    #[test]
    fn test_lookups_have_defaults() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.material_for("Jeans"), "Denim / Algodón");
        assert_eq!(catalog.material_for("Clothing"), DEFAULT_MATERIAL);
        assert_eq!(catalog.price_band_for("Coat"), PriceBand { min: 200, max: 800 });
        assert_eq!(catalog.price_band_for("Unknown"), DEFAULT_PRICE_BAND);
        assert_eq!(catalog.occasions_for("Formal")[0], "Reunión de trabajo");
        assert_eq!(
            catalog.occasions_for("Inexistente"),
            catalog.occasions_for(DEFAULT_STYLE_DISPLAY)
        );
        assert!(catalog.when_to_wear_for("Nada").starts_with("Ideal para días relajados"));
    }

    #[test]
    fn test_noise() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_noise("Person"));
        assert!(catalog.is_noise("person"));
        assert!(!catalog.is_noise("Jacket"));
    }

    #[test]
    fn test_descriptor_lookup() {
        let catalog = Catalog::builtin();
        let d = catalog.descriptor_exact("stripes").unwrap();
        assert_eq!(d.code, "Striped");
        assert_eq!(d.kind, DescriptorKind::Pattern);

        let d = catalog.descriptor_within("Floral Dress").unwrap();
        assert_eq!(d.code, "Floral");
        // "Hood" は語彙にないので "Hoodie" からディテールは出ない
        assert!(catalog.descriptor_within("Hoodie").is_none());
        // 長い語が優先（"Lace" ではなく "Necklace"）
        assert_eq!(catalog.descriptor_within("Pearl Necklace").unwrap().code, "Jewelry");
        assert_eq!(catalog.descriptor_within("Zippered Jacket").unwrap().code, "Zipper");
    }

    #[test]
    fn test_store_for() {
        let catalog = Catalog::builtin();
        let store = catalog.store_for("Saga Falabella").unwrap();
        assert!(store.physical);
        assert!(store.location.contains("Jockey Plaza"));
        assert!(!catalog.store_for("Mercado Libre Perú").unwrap().physical);
        assert!(catalog.store_for("Amazon.com").is_none());

        for source in ["HM.com", "Paris", "Pillin", "Gamarra Online"] {
            let store = catalog.store_for(source).unwrap();
            assert!(store.physical, "{} debería ser tienda física", source);
        }
    }

    #[test]
    fn test_from_json_overrides_only_given_tables() {
        let json = r#"{
            "colors": [ { "code": "Teal", "display": "Verde azulado" } ],
            "noise": ["Mannequin"]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();

        assert_eq!(catalog.colors().len(), 1);
        assert_eq!(catalog.colors().exact("teal").unwrap().display, "Verde azulado");
        assert!(catalog.is_noise("Mannequin"));
        assert!(!catalog.is_noise("Person"));
        // 指定のないテーブルは組み込みのまま
        assert!(catalog.garments(Audience::Men).exact("Jacket").is_some());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Catalog::from_json("{ invalid }").is_err());
    }
}
