//! 解析パイプライン
//!
//! 1リクエスト分の処理を順に実行する:
//! 検証 → デコード → 保存 → ラベル検出 → 属性解決 → クエリ生成 → 検索集約 → レスポンス
//!
//! 外部呼び出しはすべて逐次 await。保存・ラベル検出の失敗はリクエストを失敗させ、
//! 検索の失敗は代替リストで吸収する。

use crate::config::Config;
use crate::detector::{HttpLabelDetector, LabelDetector, StaticLabelDetector};
use crate::error::{Result, StyleMatchError};
use crate::search::{aggregate_listings, SearchSettings, SerpApiSearch, ShoppingSearch};
use crate::storage::{object_key, LocalObjectStore, ObjectStore, IMAGE_CONTENT_TYPE};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stylematch_common::{
    build_report, resolve_attributes, strip_data_uri, synthesize_queries, Audience, Catalog,
    Label, QueryPair, Resolution, StyleReport,
};

/// 呼び出し元のリクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub imagen_base64: String,
    pub genero: String,
}

impl AnalyzeRequest {
    /// 外部呼び出しの前に検証する
    pub fn validate(&self) -> Result<Audience> {
        if self.imagen_base64.trim().is_empty() {
            return Err(StyleMatchError::Validation("Falta imagen_base64".into()));
        }
        self.genero.parse::<Audience>().map_err(|_| {
            StyleMatchError::Validation("genero debe ser 'hombre' o 'mujer'".into())
        })
    }
}

/// ラベル検出に渡すパラメータ
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_labels: u32,
    pub min_confidence: f64,
    pub search: SearchSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_labels: 20,
            min_confidence: 70.0,
            search: SearchSettings::default(),
        }
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_labels: config.max_labels,
            min_confidence: config.min_confidence,
            search: SearchSettings {
                language: config.search_language.clone(),
                result_count: config.search_result_count,
            },
        }
    }
}

pub struct Pipeline {
    store: Arc<dyn ObjectStore>,
    detector: Arc<dyn LabelDetector>,
    search: Option<Arc<dyn ShoppingSearch>>,
    catalog: Arc<Catalog>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        detector: Arc<dyn LabelDetector>,
        search: Option<Arc<dyn ShoppingSearch>>,
        catalog: Arc<Catalog>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            store,
            detector,
            search,
            catalog,
            settings,
        }
    }

    /// 設定から組み立てる
    ///
    /// # Arguments
    /// * `config` - 環境変数を反映済みの設定
    /// * `labels` - 指定されればラベル検出サービスの代わりに使う
    pub fn from_config(config: &Config, labels: Option<Vec<Label>>) -> Result<Self> {
        let store = Arc::new(LocalObjectStore::new(
            config.storage_dir(),
            config.bucket_name.clone(),
        ));

        let detector: Arc<dyn LabelDetector> = match (labels, &config.label_endpoint) {
            (Some(labels), _) => Arc::new(StaticLabelDetector::new(labels)),
            (None, Some(endpoint)) => Arc::new(HttpLabelDetector::new(
                endpoint.clone(),
                config.label_timeout_seconds,
            )?),
            (None, None) => {
                return Err(StyleMatchError::Config(
                    "ラベル検出エンドポイントが未設定です（STYLEMATCH_LABEL_ENDPOINT または --labels）".into(),
                ))
            }
        };

        let search: Option<Arc<dyn ShoppingSearch>> = match config.get_serpapi_key() {
            Ok(key) => Some(Arc::new(SerpApiSearch::new(
                config.search_endpoint.clone(),
                key,
                config.search_timeout_seconds,
            )?)),
            Err(_) => {
                log::warn!("SERPAPI_KEY 未設定: 検索は代替リストになります");
                None
            }
        };

        let catalog = match &config.catalog_path {
            Some(path) => {
                log::info!("カタログ読み込み: {}", path.display());
                Catalog::from_file(path)?
            }
            None => Catalog::builtin().clone(),
        };

        Ok(Self::new(
            store,
            detector,
            search,
            Arc::new(catalog),
            PipelineSettings::from(config),
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// リクエストを処理する
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<StyleReport> {
        let audience = request.validate()?;
        let bytes = decode_image(&request.imagen_base64)?;
        self.analyze_bytes(&bytes, audience).await
    }

    /// 画像バイト列を処理する（CLIからのファイル入力用）
    pub async fn analyze_bytes(&self, bytes: &[u8], audience: Audience) -> Result<StyleReport> {
        let key = object_key(audience, bytes, chrono::Local::now());
        let object = self.store.put(&key, bytes, IMAGE_CONTENT_TYPE).await?;
        log::info!("画像を保存: {}/{} ({} bytes)", object.bucket, object.key, bytes.len());

        let labels = self
            .detector
            .detect(&object, self.settings.max_labels, self.settings.min_confidence)
            .await?;
        log::info!("ラベル検出: {}件", labels.len());

        let (resolution, queries) = resolve_and_synthesize(&labels, audience, &self.catalog);
        log::info!(
            "解決: {} / {} / {}",
            resolution.garment.code,
            resolution.color.code,
            resolution.style.code
        );

        let results = aggregate_listings(
            self.search.as_deref(),
            &queries,
            &resolution.garment.display,
            &self.settings.search,
            &self.catalog,
        )
        .await;
        log::info!(
            "店舗: {}件{}",
            results.len(),
            if results.fallback { "（代替リスト）" } else { "" }
        );

        Ok(build_report(&resolution, &queries, results, audience, &self.catalog))
    }
}

/// 属性解決とクエリ生成（外部呼び出しなし）
pub fn resolve_and_synthesize(
    labels: &[Label],
    audience: Audience,
    catalog: &Catalog,
) -> (Resolution, QueryPair) {
    let resolution = resolve_attributes(labels, audience, catalog);
    let queries = synthesize_queries(&resolution, audience);
    (resolution, queries)
}

/// base64（data URI可）をデコードする
pub fn decode_image(payload: &str) -> Result<Vec<u8>> {
    let encoded: String = strip_data_uri(payload)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| StyleMatchError::ImageDecode(e.to_string()))?;
    if bytes.is_empty() {
        return Err(StyleMatchError::ImageDecode("画像データが空です".into()));
    }
    Ok(bytes)
}
