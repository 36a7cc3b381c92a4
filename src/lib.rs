//! StyleMatch
//!
//! 衣料品写真のラベルから属性を解決し、ショッピング検索の結果を集約する。
//! 純粋なロジックは `stylematch_common`、外部サービスとの入出力はこのクレート。

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod pipeline;
pub mod search;
pub mod server;
pub mod storage;

pub use error::{Result, StyleMatchError};
pub use pipeline::{AnalyzeRequest, Pipeline, PipelineSettings};
