//! SerpAPI（Google Shopping）連携

use super::ShoppingSearch;
use crate::detector::preview;
use crate::error::{Result, StyleMatchError};
use async_trait::async_trait;
use std::time::Duration;
use stylematch_common::{parse_shopping_response, RawShoppingItem};

pub const SERPAPI_ENGINE: &str = "google_shopping";

pub struct SerpApiSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SerpApiSearch {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| StyleMatchError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    fn query_params<'a>(&'a self, query: &'a str, language: &'a str, num: &'a str) -> [(&'a str, &'a str); 5] {
        [
            ("engine", SERPAPI_ENGINE),
            ("q", query),
            ("hl", language),
            ("num", num),
            ("api_key", self.api_key.as_str()),
        ]
    }
}

#[async_trait]
impl ShoppingSearch for SerpApiSearch {
    async fn search(
        &self,
        query: &str,
        language: &str,
        result_count: u32,
    ) -> Result<Vec<RawShoppingItem>> {
        let num = result_count.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(query, language, &num))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StyleMatchError::Search("タイムアウト".into())
                } else {
                    StyleMatchError::Search(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StyleMatchError::Search(e.without_url().to_string()))?;

        // エラー時もボディに {"error": ...} が入るので先にパースする
        let items = parse_shopping_response(&text)
            .map_err(|e| StyleMatchError::Search(e.to_string()))?;
        if !status.is_success() {
            return Err(StyleMatchError::Search(format!(
                "status {}: {}",
                status,
                preview(&text)
            )));
        }

        log::debug!("SerpAPI '{}': {}件", query, items.len());
        Ok(items)
    }
}
