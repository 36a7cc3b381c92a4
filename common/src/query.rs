//! 検索クエリ生成
//!
//! 解決済みの属性から、絞り込み用（specific）と拡大用（broad）の
//! 2種類のクエリを作る。
//!
//! specific: シルエット → 色 → 柄/素材 → 種別 → スタイル → ディテール → 対象 → "shop"
//! broad:    色 → 種別 → 対象 → "online"

use crate::catalog::DescriptorKind;
use crate::resolver::{Resolution, STYLE_DEFAULT};
use crate::types::{AttributeCandidate, Audience};
use serde::{Deserialize, Serialize};
use std::fmt;

/// specific クエリ末尾の購入意図語
pub const PURCHASE_INTENT_TERM: &str = "shop";

/// broad クエリ末尾の汎用語
pub const GENERIC_INTENT_TERM: &str = "online";

/// 小文字の語の並び
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn push(&mut self, term: &str) {
        let term = term.trim().to_lowercase();
        if !term.is_empty() {
            self.terms.push(term);
        }
    }

    fn joined(&self) -> String {
        self.terms.join(" ")
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// 1リクエスト分のクエリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPair {
    pub specific: SearchQuery,
    pub broad: SearchQuery,
}

/// 属性からクエリを生成する
pub fn synthesize_queries(resolution: &Resolution, audience: Audience) -> QueryPair {
    let descriptors = resolution.descriptors.for_query();
    let first_of = |kinds: &[DescriptorKind]| {
        descriptors
            .iter()
            .find(|d| kinds.contains(&d.kind))
            .map(|d| d.code.as_str())
    };

    let mut specific = SearchQuery::default();

    if let Some(fit) = first_of(&[DescriptorKind::Fit]) {
        specific.push(fit);
    }
    if let Some(color) = color_term(&resolution.color) {
        specific.push(color);
    }
    // 既に入っている語と重なる柄/素材は入れない（例: "denim" と "denim blue"）
    let so_far = specific.joined();
    let pattern_or_material = descriptors
        .iter()
        .filter(|d| matches!(d.kind, DescriptorKind::Pattern | DescriptorKind::Material))
        .map(|d| d.code.as_str())
        .next();
    if let Some(term) = pattern_or_material {
        if !so_far.contains(&term.to_lowercase()) {
            specific.push(term);
        }
    }
    if let Some(garment) = garment_term(&resolution.garment) {
        specific.push(garment);
    }
    if !resolution.style.code.eq_ignore_ascii_case(STYLE_DEFAULT.0) {
        specific.push(&resolution.style.code);
    }
    if let Some(detail) = first_of(&[DescriptorKind::Detail]) {
        specific.push(detail);
    }
    specific.push(audience.query_term());
    specific.push(PURCHASE_INTENT_TERM);

    let mut broad = SearchQuery::default();
    if let Some(color) = color_term(&resolution.color) {
        broad.push(color);
    }
    if let Some(garment) = garment_term(&resolution.garment) {
        broad.push(garment);
    }
    broad.push(audience.query_term());
    broad.push(GENERIC_INTENT_TERM);

    QueryPair { specific, broad }
}

fn color_term(color: &AttributeCandidate) -> Option<&str> {
    (!color.is_default()).then_some(color.code.as_str())
}

fn garment_term(garment: &AttributeCandidate) -> Option<&str> {
    (!garment.is_default()).then_some(garment.code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::resolver::resolve_attributes;
    use crate::types::Label;

    fn queries(labels: &[Label], audience: Audience) -> QueryPair {
        let resolution = resolve_attributes(labels, audience, Catalog::builtin());
        synthesize_queries(&resolution, audience)
    }

    #[test]
    fn test_black_leather_jacket_query() {
        let labels = vec![
            Label::new("Black", 98.0),
            Label::new("Jacket", 91.0),
            Label::new("Leather", 80.0),
            Label::new("Person", 99.0),
        ];
        let q = queries(&labels, Audience::Men);
        assert!(q.specific.to_string().starts_with("black leather jacket men shop"));
        assert_eq!(q.broad.to_string(), "black jacket men online");
    }

    #[test]
    fn test_full_term_order() {
        let labels = vec![
            Label::new("Zipper", 60.0),
            Label::new("Slim Fit", 70.0),
            Label::new("Navy", 90.0),
            Label::new("Wool", 75.0),
            Label::new("Coat", 95.0),
            Label::new("Formal", 80.0),
        ];
        let q = queries(&labels, Audience::Men);
        assert_eq!(
            q.specific.terms(),
            &["slim fit", "navy", "wool", "coat", "formal", "zipper", "men", "shop"]
        );
        assert_eq!(q.broad.to_string(), "navy coat men online");
    }

    #[test]
    fn test_sentinels_are_omitted() {
        let q = queries(&[Label::new("Person", 99.0)], Audience::Women);
        assert_eq!(q.specific.to_string(), "women shop");
        assert_eq!(q.broad.to_string(), "women online");
        assert!(!q.specific.to_string().contains("clothing"));
        assert!(!q.broad.to_string().contains("unknown"));
    }

    #[test]
    fn test_casual_style_is_skipped_even_when_detected() {
        let labels = vec![Label::new("Casual", 90.0), Label::new("Hoodie", 88.0)];
        let q = queries(&labels, Audience::Men);
        assert_eq!(q.specific.to_string(), "hoodie men shop");
    }

    #[test]
    fn test_floral_dress_query() {
        let q = queries(&[Label::new("Floral Dress", 77.0)], Audience::Women);
        assert_eq!(q.specific.to_string(), "floral dress women shop");
        assert_eq!(q.broad.to_string(), "dress women online");
    }

    #[test]
    fn test_pattern_skipped_when_already_in_query() {
        let catalog = Catalog::from_json(
            r#"{ "colors": [ { "code": "Denim Blue", "display": "Azul denim" } ] }"#,
        )
        .unwrap();
        let labels = vec![Label::new("Denim Blue", 90.0), Label::new("Denim", 80.0)];
        let resolution = resolve_attributes(&labels, Audience::Men, &catalog);
        let q = synthesize_queries(&resolution, Audience::Men);
        assert_eq!(q.specific.to_string(), "denim blue men shop");
    }

    #[test]
    fn test_only_first_descriptors_feed_the_query() {
        let labels = vec![
            Label::new("Leather", 90.0),
            Label::new("Denim", 90.0),
            Label::new("Wool", 90.0),
            Label::new("Silk", 90.0),
            Label::new("Zipper", 90.0),
        ];
        let q = queries(&labels, Audience::Men);
        // Zipper は5番目なのでクエリ対象外
        assert_eq!(q.specific.to_string(), "leather men shop");
    }
}
