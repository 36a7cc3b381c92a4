//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    /// 外部サービスがエラー応答を返した（例: {"error": "..."}）
    #[error("Service error: {0}")]
    Service(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_service() {
        let error = Error::Service("rate limited".to_string());
        assert_eq!(format!("{}", error), "Service error: rate limited");
    }

    /// 変種はすべてこのクレートのどこかで生成されるもの
    #[test]
    fn test_error_variants_have_producers() {
        let produced = [
            crate::parse_label_list("").unwrap_err(),
            crate::parse_shopping_response(r#"{"error": "x"}"#).unwrap_err(),
            crate::Catalog::from_json("{").unwrap_err(),
            crate::Catalog::from_file(std::path::Path::new("/nonexistent/catalog.json")).unwrap_err(),
        ];
        for error in produced {
            let kind = match error {
                Error::Io(_) => "io",
                Error::Json(_) => "json",
                Error::Parse(_) => "parse",
                Error::Service(_) => "service",
            };
            assert!(!kind.is_empty());
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
