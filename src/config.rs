use crate::error::{Result, StyleMatchError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SERPAPI_KEY_ENV: &str = "SERPAPI_KEY";
pub const LABEL_ENDPOINT_ENV: &str = "STYLEMATCH_LABEL_ENDPOINT";
pub const STORAGE_DIR_ENV: &str = "STYLEMATCH_STORAGE_DIR";
pub const BUCKET_NAME_ENV: &str = "S3_BUCKET_NAME";

/// 本文上限の既定値（10 MiB）
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub serpapi_key: Option<String>,
    pub search_endpoint: String,
    /// 検索結果の言語（hl）
    pub search_language: String,
    pub search_result_count: u32,
    pub search_timeout_seconds: u64,
    /// ラベル検出ゲートウェイ（未設定ならCLIの --labels が必要）
    pub label_endpoint: Option<String>,
    pub label_timeout_seconds: u64,
    pub max_labels: u32,
    pub min_confidence: f64,
    pub storage_dir: Option<PathBuf>,
    pub bucket_name: String,
    pub bind: String,
    /// POST /analyze の本文の上限（バイト）。base64の写真がそのまま入る
    pub max_body_bytes: usize,
    /// カタログJSON（未設定なら組み込み）
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StyleMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("stylematch").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            serpapi_key: None,
            search_endpoint: "https://serpapi.com/search.json".into(),
            search_language: "es".into(),
            search_result_count: 20,
            search_timeout_seconds: 12,
            label_endpoint: None,
            label_timeout_seconds: 20,
            max_labels: 20,
            min_confidence: 70.0,
            storage_dir: None,
            bucket_name: "stylematch-uploads".into(),
            bind: "127.0.0.1:8080".into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            catalog_path: None,
        }
    }

    /// 環境変数を反映した設定
    ///
    /// ファイルに保存する値は変えないので、`save()` の前には使わない。
    pub fn resolved(&self) -> Self {
        self.resolved_with(|name| std::env::var(name).ok())
    }

    fn resolved_with(&self, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let mut config = self.clone();

        if let Some(key) = env(SERPAPI_KEY_ENV) {
            config.serpapi_key = Some(key);
        }
        if let Some(endpoint) = env(LABEL_ENDPOINT_ENV) {
            config.label_endpoint = Some(endpoint);
        }
        if let Some(dir) = env(STORAGE_DIR_ENV) {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(bucket) = env(BUCKET_NAME_ENV) {
            config.bucket_name = bucket;
        }
        config
    }

    pub fn get_serpapi_key(&self) -> Result<String> {
        self.serpapi_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(StyleMatchError::MissingApiKey)
    }

    pub fn set_serpapi_key(&mut self, key: String) -> Result<()> {
        self.serpapi_key = Some(key);
        self.save()
    }

    /// オブジェクトの保存先（未設定ならデータディレクトリ配下）
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("stylematch")
                .join("objects")
        })
    }
}
