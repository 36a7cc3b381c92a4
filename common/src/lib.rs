//! StyleMatch Common Library
//!
//! CLIとHTTPサーバーで共有される、I/Oを持たない解析ロジック:
//! カタログ、属性解決、クエリ生成、検索結果の正規化、レスポンス組み立て

pub mod catalog;
pub mod descriptors;
pub mod error;
pub mod listing;
pub mod parser;
pub mod query;
pub mod report;
pub mod resolver;
pub mod types;

pub use catalog::{Catalog, DescriptorKind};
pub use descriptors::DescriptorSet;
pub use error::{Error, Result};
pub use listing::{
    fallback_listings, merge_listings, needs_broadening, normalize_item, Currency, Listing,
    ListingKind, RawShoppingItem, ResultSet,
};
pub use parser::{parse_label_list, parse_label_response, parse_shopping_response, strip_data_uri};
pub use query::{synthesize_queries, QueryPair, SearchQuery};
pub use report::{build_report, GarmentReport, StyleReport};
pub use resolver::{resolve_attributes, Resolution};
pub use types::{AttributeCandidate, Audience, Label, LabelView, Origin, Strategy};
