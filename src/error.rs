use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleMatchError {
    /// リクエストの検証エラー（呼び出し元の誤り）
    #[error("{0}")]
    Validation(String),

    #[error("画像デコードエラー: {0}")]
    ImageDecode(String),

    #[error("ストレージエラー: {0}")]
    Storage(String),

    #[error("ラベル検出エラー: {0}")]
    LabelDetection(String),

    #[error("検索エラー: {0}")]
    Search(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("SerpAPIキーが設定されていません。`stylematch config --set-serpapi-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] stylematch_common::Error),
}

impl StyleMatchError {
    /// 400を返すべきエラーか
    pub fn is_client_error(&self) -> bool {
        matches!(self, StyleMatchError::Validation(_))
    }

    /// 呼び出し元に返す短いメッセージ（スペイン語）
    ///
    /// 検証エラーはそのまま、それ以外は失敗した段階だけを示す。
    pub fn caller_message(&self) -> String {
        match self {
            StyleMatchError::Validation(msg) => msg.clone(),
            StyleMatchError::ImageDecode(_) => "Error interno: no se pudo leer la imagen".into(),
            StyleMatchError::Storage(_) => "Error interno: no se pudo guardar la imagen".into(),
            StyleMatchError::LabelDetection(_) => {
                "Error interno: no se pudo analizar la imagen".into()
            }
            StyleMatchError::Search(_) => "Error interno: falló la búsqueda de tiendas".into(),
            _ => "Error interno del servidor".into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleMatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(StyleMatchError::Validation("Falta imagen_base64".into()).is_client_error());
        assert!(!StyleMatchError::Storage("disk full".into()).is_client_error());
        assert!(!StyleMatchError::MissingApiKey.is_client_error());
    }

    #[test]
    fn test_caller_message_hides_cause() {
        let err = StyleMatchError::LabelDetection("connection refused 10.0.0.5:443".into());
        let msg = err.caller_message();
        assert!(!msg.contains("10.0.0.5"));
        assert!(msg.contains("analizar la imagen"));
    }

    #[test]
    fn test_common_error_is_transparent() {
        let err: StyleMatchError = stylematch_common::Error::Service("rate limited".into()).into();
        assert_eq!(err.to_string(), "Service error: rate limited");
    }
}
