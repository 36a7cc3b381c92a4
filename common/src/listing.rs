//! ショッピング検索結果の正規化とマージ
//!
//! 検索サービスの生アイテムを `Listing` に正規化し、
//! specific / broad の2回分を重複排除して上限件数に詰める。
//! 検索が使えないときはカタログの代替ストアから固定リストを作る。

use crate::catalog::Catalog;
use crate::types::round_to;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// specific の件数がこれ未満なら broad も検索する
pub const BROADEN_THRESHOLD: usize = 6;

/// 結果リストの上限
pub const MAX_LISTINGS: usize = 18;

/// 重複判定に使うタイトルの先頭文字数
pub const TITLE_KEY_CHARS: usize = 40;

/// 一覧に付けるサイズ
pub const LISTING_SIZES: [&str; 4] = ["S", "M", "L", "XL"];

pub const DEFAULT_SOURCE_NAME: &str = "Tienda online";
pub const DEFAULT_TITLE: &str = "Producto";
pub const DEFAULT_LINK: &str = "#";
pub const ONLINE_LOCATION: &str = "Envío internacional";
pub const PRICE_ON_REQUEST: &str = "Consultar";

lazy_static::lazy_static! {
    static ref NUMBER_RE: regex::Regex =
        regex::Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid number regex");
}

/// 実店舗 / オンライン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingKind {
    #[serde(rename = "fisica")]
    Physical,
    #[serde(rename = "online")]
    Online,
}

/// 表示価格から推定した通貨（換算はしない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Pen,
    Eur,
    Gbp,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pen => "PEN",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Pen => "S/",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 表示価格の文字列から通貨を判定する
///
/// 判定順: PEN → EUR → GBP → それ以外は USD
pub fn detect_currency(display_price: &str) -> Currency {
    let upper = display_price.to_uppercase();
    if upper.contains("S/") || upper.contains("PEN") {
        Currency::Pen
    } else if upper.contains('€') || upper.contains("EUR") {
        Currency::Eur
    } else if upper.contains('£') || upper.contains("GBP") {
        Currency::Gbp
    } else {
        Currency::Usd
    }
}

/// 検索サービスの生アイテム（`shopping_results` の1要素）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawShoppingItem {
    pub source: Option<String>,
    pub title: Option<String>,
    /// 表示用の価格文字列（例: "S/ 189.90"）
    pub price: Option<String>,
    /// 数値またはカンマ付き文字列
    pub extracted_price: Option<Value>,
    pub product_link: Option<String>,
    pub link: Option<String>,
    pub serpapi_product_api: Option<String>,
    pub thumbnail: Option<String>,
    pub rating: Option<Value>,
    pub reviews: Option<Value>,
}

/// 正規化済みの商品1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "nombre")]
    pub source_name: String,
    #[serde(rename = "tipo")]
    pub kind: ListingKind,
    #[serde(rename = "producto")]
    pub title: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "moneda")]
    pub currency: Currency,
    #[serde(rename = "precio_texto")]
    pub display_price: String,
    #[serde(rename = "tallas")]
    pub sizes: Vec<String>,
    #[serde(rename = "ubicacion")]
    pub location: String,
    pub link: String,
    #[serde(rename = "disponible")]
    pub available: bool,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reviews: Option<u64>,
}

impl Listing {
    /// 重複判定キー（ソース名, タイトル先頭40文字）
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.source_name.clone(),
            self.title.chars().take(TITLE_KEY_CHARS).collect(),
        )
    }
}

/// 集約結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub listings: Vec<Listing>,
    /// 固定の代替リストに差し替えたか
    pub fallback: bool,
}

impl ResultSet {
    pub fn from_search(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            fallback: false,
        }
    }

    pub fn fallback(garment_display: &str, catalog: &Catalog) -> Self {
        Self {
            listings: fallback_listings(garment_display, catalog),
            fallback: true,
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// specific の件数から broad 検索が必要か判定
pub fn needs_broadening(specific_count: usize) -> bool {
    specific_count < BROADEN_THRESHOLD
}

/// 数値価格を取り出す
///
/// `extracted_price`（数値 / カンマ付き文字列）を優先し、
/// なければ表示価格の最初の数値。どちらもなければ 0。
pub fn extract_price(extracted: Option<&Value>, display_price: &str) -> f64 {
    let from_extracted = extracted.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    });

    let price = from_extracted.or_else(|| {
        NUMBER_RE
            .find(display_price)
            .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
    });

    match price {
        Some(p) if p.is_finite() && p >= 0.0 => round_to(p, 2),
        _ => 0.0,
    }
}

/// 生アイテムを正規化する
pub fn normalize_item(item: &RawShoppingItem, catalog: &Catalog) -> Listing {
    let source_name = non_empty(item.source.as_deref()).unwrap_or(DEFAULT_SOURCE_NAME);
    let title = non_empty(item.title.as_deref()).unwrap_or(DEFAULT_TITLE);
    let display_price = item.price.as_deref().unwrap_or("").trim();

    let price = extract_price(item.extracted_price.as_ref(), display_price);
    let currency = detect_currency(display_price);
    let display_price = if !display_price.is_empty() {
        display_price.to_string()
    } else if price > 0.0 {
        format!("{} {:.2}", currency.symbol(), price)
    } else {
        PRICE_ON_REQUEST.to_string()
    };

    let (kind, location) = match catalog.store_for(source_name) {
        Some(store) if store.physical => (ListingKind::Physical, store.location.clone()),
        Some(store) => (ListingKind::Online, store.location.clone()),
        None => (ListingKind::Online, ONLINE_LOCATION.to_string()),
    };

    let link = non_empty(item.product_link.as_deref())
        .or_else(|| non_empty(item.link.as_deref()))
        .or_else(|| non_empty(item.serpapi_product_api.as_deref()))
        .unwrap_or(DEFAULT_LINK);

    Listing {
        source_name: source_name.to_string(),
        kind,
        title: title.to_string(),
        price,
        currency,
        display_price,
        sizes: listing_sizes(),
        location,
        link: link.to_string(),
        available: true,
        image: item.thumbnail.clone().unwrap_or_default(),
        rating: item.rating.as_ref().and_then(value_as_f64),
        reviews: item.reviews.as_ref().and_then(value_as_u64),
    }
}

/// 検索が使えないときの固定リスト
pub fn fallback_listings(garment_display: &str, catalog: &Catalog) -> Vec<Listing> {
    catalog
        .fallback_stores()
        .iter()
        .map(|store| Listing {
            source_name: store.name.clone(),
            kind: ListingKind::Online,
            title: format!("{} — Buscar en tienda", garment_display),
            price: 0.0,
            currency: Currency::Usd,
            display_price: PRICE_ON_REQUEST.to_string(),
            sizes: listing_sizes(),
            location: ONLINE_LOCATION.to_string(),
            link: store.link.clone(),
            available: true,
            image: String::new(),
            rating: None,
            reviews: None,
        })
        .collect()
}

/// specific → broad の順に連結し、重複を除いて上限で切る（先勝ち）
pub fn merge_listings(specific: Vec<Listing>, broad: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    specific
        .into_iter()
        .chain(broad)
        .filter(|listing| seen.insert(listing.dedup_key()))
        .take(MAX_LISTINGS)
        .collect()
}

fn listing_sizes() -> Vec<String> {
    LISTING_SIZES.iter().map(|s| s.to_string()).collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> RawShoppingItem {
        serde_json::from_value(value).unwrap()
    }

    fn listing(source: &str, title: &str) -> Listing {
        normalize_item(
            &item(json!({ "source": source, "title": title, "extracted_price": 10 })),
            Catalog::builtin(),
        )
    }

    #[test]
    fn test_detect_currency_order() {
        assert_eq!(detect_currency("S/ 189.90"), Currency::Pen);
        assert_eq!(detect_currency("PEN 50"), Currency::Pen);
        assert_eq!(detect_currency("49,99 €"), Currency::Eur);
        assert_eq!(detect_currency("£30.00"), Currency::Gbp);
        assert_eq!(detect_currency("$25.00"), Currency::Usd);
        assert_eq!(detect_currency(""), Currency::Usd);
        // 複数含む場合は PEN が優先
        assert_eq!(detect_currency("S/ 100 (EUR 25)"), Currency::Pen);
    }

    #[test]
    fn test_extract_price() {
        assert_eq!(extract_price(Some(&json!(189.904)), ""), 189.9);
        assert_eq!(extract_price(Some(&json!("1,299.50")), ""), 1299.5);
        assert_eq!(extract_price(None, "S/ 1,050.00"), 1050.0);
        assert_eq!(extract_price(Some(&json!("abc")), "$12"), 12.0);
        assert_eq!(extract_price(None, "Consultar"), 0.0);
        assert_eq!(extract_price(Some(&json!(null)), ""), 0.0);
    }

    #[test]
    fn test_normalize_known_physical_store() {
        let l = normalize_item(
            &item(json!({
                "source": "Saga Falabella",
                "title": "Casaca de cuero negra",
                "price": "S/ 299.90",
                "extracted_price": 299.9,
                "product_link": "https://falabella.com.pe/p/1",
                "thumbnail": "https://img/1.jpg",
                "rating": 4.5,
                "reviews": 120
            })),
            Catalog::builtin(),
        );
        assert_eq!(l.kind, ListingKind::Physical);
        assert!(l.location.contains("Jockey Plaza"));
        assert_eq!(l.currency, Currency::Pen);
        assert_eq!(l.price, 299.9);
        assert_eq!(l.link, "https://falabella.com.pe/p/1");
        assert_eq!(l.rating, Some(4.5));
        assert_eq!(l.reviews, Some(120));
        assert!(l.available);
    }

    #[test]
    fn test_normalize_defaults() {
        let l = normalize_item(&item(json!({})), Catalog::builtin());
        assert_eq!(l.source_name, DEFAULT_SOURCE_NAME);
        assert_eq!(l.title, DEFAULT_TITLE);
        assert_eq!(l.link, DEFAULT_LINK);
        assert_eq!(l.kind, ListingKind::Online);
        assert_eq!(l.location, ONLINE_LOCATION);
        assert_eq!(l.price, 0.0);
        assert_eq!(l.currency, Currency::Usd);
        assert_eq!(l.display_price, PRICE_ON_REQUEST);
        assert_eq!(l.sizes, vec!["S", "M", "L", "XL"]);
        assert!(l.rating.is_none());
    }

    #[test]
    fn test_normalize_link_priority() {
        let l = normalize_item(
            &item(json!({ "product_link": "", "link": "https://a", "serpapi_product_api": "https://b" })),
            Catalog::builtin(),
        );
        assert_eq!(l.link, "https://a");

        let l = normalize_item(
            &item(json!({ "serpapi_product_api": "https://b" })),
            Catalog::builtin(),
        );
        assert_eq!(l.link, "https://b");
    }

    #[test]
    fn test_online_known_store_keeps_location() {
        let l = listing("Mercado Libre", "Jean slim");
        assert_eq!(l.kind, ListingKind::Online);
        assert_eq!(l.location, "Envío a todo Lima");
    }

    #[test]
    fn test_lima_stores_without_ampersand_are_physical() {
        let l = listing("HM.com", "Casaca");
        assert_eq!(l.kind, ListingKind::Physical);
        assert!(l.location.contains("Jockey Plaza"));

        let l = listing("Paris", "Blusa");
        assert_eq!(l.kind, ListingKind::Physical);
        assert_ne!(l.location, ONLINE_LOCATION);
    }

    #[test]
    fn test_display_price_built_from_number() {
        let l = listing("ASOS", "Hoodie");
        assert_eq!(l.display_price, "$ 10.00");
    }

    #[test]
    fn test_merge_dedups_first_wins() {
        let long_title = "Chaqueta de cuero negra para hombre con cierre metálico";
        let specific = vec![listing("Ripley", long_title), listing("Zara", "Chaqueta")];
        let mut dup = listing("Ripley", &format!("{} - edición", &long_title[..45]));
        dup.price = 99.0;
        let broad = vec![dup, listing("Oechsle", "Chaqueta"), listing("Zara", "Chaqueta")];

        let merged = merge_listings(specific, broad);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].source_name, "Ripley");
        assert_eq!(merged[0].price, 10.0);
        assert_eq!(merged[2].source_name, "Oechsle");
    }

    #[test]
    fn test_merge_caps_at_max() {
        let specific: Vec<Listing> = (0..12).map(|i| listing("A", &format!("item {}", i))).collect();
        let broad: Vec<Listing> = (0..12).map(|i| listing("B", &format!("item {}", i))).collect();
        let merged = merge_listings(specific, broad);
        assert_eq!(merged.len(), MAX_LISTINGS);
        assert_eq!(merged[11].source_name, "A");
        assert_eq!(merged[12].source_name, "B");
    }

    #[test]
    fn test_fallback_listings() {
        let listings = fallback_listings("Chaqueta", Catalog::builtin());
        let names: Vec<&str> = listings.iter().map(|l| l.source_name.as_str()).collect();
        assert_eq!(names, vec!["Amazon", "ASOS", "Zara", "H&M", "Shein", "Mercado Libre"]);
        assert!(listings.iter().all(|l| l.kind == ListingKind::Online && l.price == 0.0));
        assert_eq!(listings[0].title, "Chaqueta — Buscar en tienda");
        assert_eq!(listings[0].currency, Currency::Usd);
    }

    #[test]
    fn test_needs_broadening() {
        assert!(needs_broadening(0));
        assert!(needs_broadening(5));
        assert!(!needs_broadening(6));
    }

    #[test]
    fn test_listing_wire_keys() {
        let value = serde_json::to_value(listing("Zara", "Blazer")).unwrap();
        assert_eq!(value["tipo"], "fisica");
        assert_eq!(value["moneda"], "USD");
        assert_eq!(value["nombre"], "Zara");
        assert!(value.get("rating").is_none());
    }
}
