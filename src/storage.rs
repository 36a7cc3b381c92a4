//! 画像オブジェクトの保存
//!
//! 保存先は `ObjectStore` トレイトで差し替える。
//! 標準実装はローカルディレクトリに `{bucket}/{key}` で書き込む。

use crate::error::{Result, StyleMatchError};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use stylematch_common::Audience;

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// 保存済みオブジェクトの参照（ラベル検出に渡す）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 同じキーは上書き
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<ObjectRef>;
}

/// オブジェクトキーを作る
///
/// `uploads/{genero}/{sha256先頭16桁}_{YYYYmmdd_HHMMSS}.jpg`
pub fn object_key(audience: Audience, bytes: &[u8], now: DateTime<Local>) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    format!(
        "uploads/{}/{}_{}.jpg",
        audience.as_str(),
        &digest[..16],
        now.format("%Y%m%d_%H%M%S")
    )
}

/// ローカルディレクトリへの保存
pub struct LocalObjectStore {
    root: PathBuf,
    bucket: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    pub fn bucket_dir(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(StyleMatchError::Storage(format!("不正なオブジェクトキー: {}", key)));
        }
        Ok(self.bucket_dir().join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<ObjectRef> {
        let path = self.object_path(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StyleMatchError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StyleMatchError::Storage(format!("{}: {}", path.display(), e)))?;

        log::debug!(
            "保存: {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            content_type
        );

        Ok(ObjectRef {
            bucket: self.bucket.clone(),
            key: key.to_string(),
        })
    }
}
