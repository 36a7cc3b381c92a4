//! ディテール語の集合
//!
//! 検出順を保持し、コードの重複と部分文字列の重複を排除する。
//! 件数の上限は表示時・クエリ生成時にかける。

use crate::catalog::DescriptorKind;
use serde::{Deserialize, Serialize};

/// 表示に出すディテール語の上限
pub const DESCRIPTOR_DISPLAY_CAP: usize = 6;

/// クエリ生成の対象にするディテール語の上限（先頭から）
pub const DESCRIPTOR_QUERY_CAP: usize = 4;

/// ディテール語1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub code: String,
    pub kind: DescriptorKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorSet {
    entries: Vec<Descriptor>,
}

impl DescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加する。既存と重複（どちらかが他方の部分文字列）なら追加せず false
    pub fn insert(&mut self, code: &str, kind: DescriptorKind) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        let lower = code.to_lowercase();
        let duplicated = self.entries.iter().any(|d| {
            let existing = d.code.to_lowercase();
            existing.contains(&lower) || lower.contains(&existing)
        });
        if duplicated {
            return false;
        }

        self.entries.push(Descriptor {
            code: code.to_string(),
            kind,
        });
        true
    }

    pub fn entries(&self) -> &[Descriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.code.as_str()).collect()
    }

    /// 表示用（上限付き）
    pub fn display_codes(&self) -> Vec<String> {
        self.entries
            .iter()
            .take(DESCRIPTOR_DISPLAY_CAP)
            .map(|d| d.code.clone())
            .collect()
    }

    /// クエリ生成の対象（上限付き）
    pub fn for_query(&self) -> &[Descriptor] {
        let end = self.entries.len().min(DESCRIPTOR_QUERY_CAP);
        &self.entries[..end]
    }
}
