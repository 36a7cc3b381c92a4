//! ショッピング検索と結果の集約
//!
//! 1. specific クエリを検索
//! 2. 件数がしきい値未満なら broad クエリも検索（必ず specific の後）
//! 3. specific → broad の順にマージ・重複排除・上限カット
//! 4. 未設定・エラー・両方0件なら固定の代替リスト
//!
//! 検索の失敗は呼び出し元に返さず、ログに残して代替リストで補う。

mod serpapi;

pub use serpapi::SerpApiSearch;

use crate::error::Result;
use async_trait::async_trait;
use stylematch_common::{
    merge_listings, needs_broadening, normalize_item, Catalog, Listing, QueryPair,
    RawShoppingItem, ResultSet, SearchQuery,
};

#[async_trait]
pub trait ShoppingSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        language: &str,
        result_count: u32,
    ) -> Result<Vec<RawShoppingItem>>;
}

/// 検索呼び出しのパラメータ
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub language: String,
    pub result_count: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            language: "es".into(),
            result_count: 20,
        }
    }
}

/// 検索結果を集約する
///
/// # Arguments
/// * `search` - 検索サービス（未設定なら None）
/// * `queries` - specific / broad クエリ
/// * `garment_display` - 代替リストの商品名に使う衣料品名
/// * `settings` - 言語・件数
/// * `catalog` - 既知ストア・代替ストアの参照先
///
/// # Returns
/// 常に結果を返す（失敗時は代替リスト）
pub async fn aggregate_listings(
    search: Option<&dyn ShoppingSearch>,
    queries: &QueryPair,
    garment_display: &str,
    settings: &SearchSettings,
    catalog: &Catalog,
) -> ResultSet {
    let Some(search) = search else {
        log::warn!("検索サービス未設定のため代替リストを使用");
        return ResultSet::fallback(garment_display, catalog);
    };

    let specific = run_query(search, &queries.specific, settings, catalog).await;
    log::info!("specific クエリ: '{}' → {}件", queries.specific, specific.len());

    let broad = if needs_broadening(specific.len()) {
        let broad = run_query(search, &queries.broad, settings, catalog).await;
        log::info!("broad クエリ: '{}' → {}件", queries.broad, broad.len());
        broad
    } else {
        Vec::new()
    };

    let merged = merge_listings(specific, broad);
    if merged.is_empty() {
        log::warn!("検索結果が0件のため代替リストを使用");
        return ResultSet::fallback(garment_display, catalog);
    }

    ResultSet::from_search(merged)
}

/// 1クエリ分を検索して正規化する（失敗は0件扱い）
async fn run_query(
    search: &dyn ShoppingSearch,
    query: &SearchQuery,
    settings: &SearchSettings,
    catalog: &Catalog,
) -> Vec<Listing> {
    if query.is_empty() {
        return Vec::new();
    }

    match search
        .search(&query.to_string(), &settings.language, settings.result_count)
        .await
    {
        Ok(items) => items.iter().map(|item| normalize_item(item, catalog)).collect(),
        Err(e) => {
            log::warn!("検索エラー（'{}'）: {}", query, e);
            Vec::new()
        }
    }
}
