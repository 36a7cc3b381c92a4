//! ラベル検出サービス連携
//!
//! - HttpLabelDetector: DetectLabels形式のJSONをPOSTするゲートウェイ
//! - StaticLabelDetector: 固定ラベルを返す（CLIの --labels、テスト用）

use crate::error::{Result, StyleMatchError};
use crate::storage::ObjectRef;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use stylematch_common::{parse_label_response, Label};

#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// 保存済み画像のラベルを検出する（並び順は検出サービスのまま）
    async fn detect(
        &self,
        object: &ObjectRef,
        max_labels: u32,
        min_confidence: f64,
    ) -> Result<Vec<Label>>;
}

pub struct HttpLabelDetector {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLabelDetector {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| StyleMatchError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// DetectLabels形式のリクエストボディ
pub fn detect_labels_request(object: &ObjectRef, max_labels: u32, min_confidence: f64) -> serde_json::Value {
    json!({
        "Image": {
            "S3Object": {
                "Bucket": object.bucket,
                "Name": object.key,
            }
        },
        "MaxLabels": max_labels,
        "MinConfidence": min_confidence,
    })
}

#[async_trait]
impl LabelDetector for HttpLabelDetector {
    async fn detect(
        &self,
        object: &ObjectRef,
        max_labels: u32,
        min_confidence: f64,
    ) -> Result<Vec<Label>> {
        let body = detect_labels_request(object, max_labels, min_confidence);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| StyleMatchError::LabelDetection(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StyleMatchError::LabelDetection(e.to_string()))?;

        if !status.is_success() {
            return Err(StyleMatchError::LabelDetection(format!(
                "status {}: {}",
                status,
                preview(&text)
            )));
        }

        log::debug!("ラベル検出レスポンス: {}", preview(&text));
        parse_label_response(&text).map_err(|e| StyleMatchError::LabelDetection(e.to_string()))
    }
}

/// 固定ラベルを返す検出器
pub struct StaticLabelDetector {
    labels: Vec<Label>,
}

impl StaticLabelDetector {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }
}

#[async_trait]
impl LabelDetector for StaticLabelDetector {
    async fn detect(
        &self,
        _object: &ObjectRef,
        max_labels: u32,
        min_confidence: f64,
    ) -> Result<Vec<Label>> {
        Ok(self
            .labels
            .iter()
            .filter(|l| l.confidence >= min_confidence)
            .take(max_labels as usize)
            .cloned()
            .collect())
    }
}

/// ログ用に先頭だけ切り出す
pub(crate) fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 300;
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
