//! HTTPサーバー
//!
//! - POST /analyze: 解析（200 / 400 / 500）
//! - OPTIONS /analyze: CORSプリフライト（204）
//! - GET /health
//!
//! すべてのレスポンスにCORSヘッダーを付ける。エラーは
//! `{"success": false, "error": "..."}` の形で返す。
//! 本文が上限を超えた場合も同じ形（413）になる。

use crate::error::Result;
use crate::pipeline::{AnalyzeRequest, Pipeline};
use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

const BODY_TOO_LARGE_MESSAGE: &str = "La imagen es demasiado grande";

/// ハンドラ間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, max_body_bytes: usize) -> Self {
        Self { pipeline, max_body_bytes }
    }
}

/// ルーターを組み立てる
///
/// # Arguments
/// * `pipeline` - 全リクエストで共有する解析パイプライン
/// * `max_body_bytes` - POST /analyze の本文上限
pub fn router(pipeline: Arc<Pipeline>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler).options(preflight_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState::new(pipeline, max_body_bytes))
}

/// サーバーを起動する（終了まで戻らない）
pub async fn serve(pipeline: Arc<Pipeline>, bind: &str, max_body_bytes: usize) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let local_addr = listener.local_addr()?;
    log::info!("待ち受け開始: http://{}/analyze (本文上限 {} バイト)", local_addr, max_body_bytes);

    axum::serve(listener, router(pipeline, max_body_bytes)).await?;
    Ok(())
}

/// 本文は上限付きで自前で読む（axumの拒否応答にはCORSヘッダーが付かない）
pub(crate) async fn analyze_handler(State(state): State<AppState>, body: Body) -> Response {
    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("本文を読み込めません（上限 {} バイト）: {}", state.max_body_bytes, e);
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE_MESSAGE);
        }
    };
    handle_analyze(&state.pipeline, body).await
}

async fn handle_analyze(pipeline: &Pipeline, body: Bytes) -> Response {
    let request: AnalyzeRequest = if body.iter().all(u8::is_ascii_whitespace) {
        AnalyzeRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("不正なリクエストJSON: {}", e);
                return error_response(StatusCode::BAD_REQUEST, "JSON inválido");
            }
        }
    };

    match pipeline.analyze(&request).await {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(e) if e.is_client_error() => {
            log::info!("リクエスト拒否: {}", e);
            error_response(StatusCode::BAD_REQUEST, &e.caller_message())
        }
        Err(e) => {
            log::error!("解析失敗: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.caller_message())
        }
    }
}

pub(crate) async fn preflight_handler() -> Response {
    build_response(StatusCode::NO_CONTENT, Body::empty(), None)
}

pub(crate) async fn health_handler() -> Response {
    json_response(StatusCode::OK, &json!({ "status": "ok" }))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, &json!({ "success": false, "error": message }))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => build_response(status, Body::from(bytes), Some("application/json")),
        Err(e) => {
            log::error!("レスポンスのシリアライズに失敗: {}", e);
            build_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Body::from(r#"{"success":false,"error":"Error interno del servidor"}"#),
                Some("application/json"),
            )
        }
    }
}

fn build_response(status: StatusCode, body: Body, content_type: Option<&'static str>) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}
