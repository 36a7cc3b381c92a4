//! 外部サービスのレスポンスパーサー
//!
//! ラベル検出（DetectLabels形式）とショッピング検索（SerpAPI形式）の
//! JSONを共通の型に変換する。画像のdata URI接頭辞の除去もここで行う。

use crate::error::{Error, Result};
use crate::listing::RawShoppingItem;
use crate::types::Label;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct DetectLabelsResponse {
    #[serde(rename = "Labels", default)]
    labels: Vec<DetectedLabel>,
}

#[derive(Debug, Deserialize)]
struct DetectedLabel {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Confidence", default)]
    confidence: f64,
    #[serde(rename = "Parents", default)]
    parents: Vec<ParentLabel>,
}

#[derive(Debug, Deserialize)]
struct ParentLabel {
    #[serde(rename = "Name")]
    name: String,
}

/// ラベル検出レスポンスをパース
///
/// `{"Labels":[{"Name","Confidence","Parents":[{"Name"}]}]}` を
/// 検出サービスの並び順のまま `Label` 列にする。
///
/// # Arguments
/// * `response` - レスポンスボディ
///
/// # Returns
/// * `Ok(Vec<Label>)` - パース成功（`Labels` が無ければ空）
/// * `Err` - JSONとして読めない場合
pub fn parse_label_response(response: &str) -> Result<Vec<Label>> {
    let parsed: DetectLabelsResponse = serde_json::from_str(response.trim())
        .map_err(|e| Error::Parse(format!("ラベル検出 JSONパースエラー: {}", e)))?;

    Ok(parsed
        .labels
        .into_iter()
        .map(|l| Label {
            name: l.name,
            confidence: l.confidence,
            parent_names: l.parents.into_iter().map(|p| p.name).collect(),
        })
        .collect())
}

/// ラベル列をパース
///
/// CLIの `--labels` ファイル用。DetectLabels形式と
/// `[{"name","confidence","parent_names"}]` の配列形式の両方を受け付ける。
pub fn parse_label_list(content: &str) -> Result<Vec<Label>> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| Error::Parse(format!("ラベル一覧 JSONパースエラー: {}", e)));
    }
    parse_label_response(trimmed)
}

/// ショッピング検索レスポンスをパース
///
/// # Returns
/// * `Ok(Vec<RawShoppingItem>)` - `shopping_results` の要素（無ければ空）
/// * `Err(Error::Service)` - ボディに `error` キーがある場合
/// * `Err(Error::Parse)` - JSONとして読めない場合
pub fn parse_shopping_response(response: &str) -> Result<Vec<RawShoppingItem>> {
    let value: Value = serde_json::from_str(response.trim())
        .map_err(|e| Error::Parse(format!("検索 JSONパースエラー: {}", e)))?;

    if let Some(error) = value.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(Error::Service(message));
    }

    match value.get("shopping_results") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(results) => serde_json::from_value(results.clone())
            .map_err(|e| Error::Parse(format!("shopping_results パースエラー: {}", e))),
    }
}

/// data URI の接頭辞（`data:image/jpeg;base64,` など）を取り除く
///
/// 接頭辞が無ければそのまま返す。
pub fn strip_data_uri(payload: &str) -> &str {
    let trimmed = payload.trim();
    if trimmed.starts_with("data:") {
        if let Some(comma) = trimmed.find(',') {
            return &trimmed[comma + 1..];
        }
    }
    trimmed
}
