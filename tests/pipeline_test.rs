//! 解析パイプラインの結合テスト
//!
//! 外部サービスはすべてモックに差し替えて、リクエストからレスポンスまでを検証

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stylematch::detector::{LabelDetector, StaticLabelDetector};
use stylematch::error::{Result, StyleMatchError};
use stylematch::search::ShoppingSearch;
use stylematch::storage::{ObjectRef, ObjectStore};
use stylematch::{AnalyzeRequest, Pipeline, PipelineSettings};
use stylematch_common::{
    fallback_listings, parse_shopping_response, Catalog, Label, ListingKind, RawShoppingItem,
};

/// 保存内容をメモリに記録するストア
#[derive(Default)]
struct MemoryStore {
    puts: Mutex<Vec<(String, usize, String)>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<ObjectRef> {
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), bytes.len(), content_type.to_string()));
        Ok(ObjectRef {
            bucket: "test-bucket".into(),
            key: key.to_string(),
        })
    }
}

struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put(&self, _: &str, _: &[u8], _: &str) -> Result<ObjectRef> {
        Err(StyleMatchError::Storage("access denied for arn:aws:s3:::secret".into()))
    }
}

/// 呼び出し回数を数える検出器
struct CountingDetector {
    inner: StaticLabelDetector,
    calls: AtomicUsize,
}

impl CountingDetector {
    fn new(labels: Vec<Label>) -> Self {
        Self {
            inner: StaticLabelDetector::new(labels),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LabelDetector for CountingDetector {
    async fn detect(&self, object: &ObjectRef, max_labels: u32, min_confidence: f64) -> Result<Vec<Label>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.detect(object, max_labels, min_confidence).await
    }
}

/// 固定のレスポンスボディを返す検索（SerpAPI形式）
struct CannedSearch {
    body: String,
    queries: Mutex<Vec<String>>,
}

impl CannedSearch {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ShoppingSearch for CannedSearch {
    async fn search(&self, query: &str, _: &str, _: u32) -> Result<Vec<RawShoppingItem>> {
        self.queries.lock().unwrap().push(query.to_string());
        parse_shopping_response(&self.body).map_err(|e| StyleMatchError::Search(e.to_string()))
    }
}

fn request(genero: &str) -> AnalyzeRequest {
    AnalyzeRequest {
        // "fake-jpeg"
        imagen_base64: "data:image/jpeg;base64,ZmFrZS1qcGVn".into(),
        genero: genero.into(),
    }
}

fn pipeline(
    store: Arc<dyn ObjectStore>,
    detector: Arc<dyn LabelDetector>,
    search: Option<Arc<dyn ShoppingSearch>>,
) -> Pipeline {
    Pipeline::new(
        store,
        detector,
        search,
        Arc::new(Catalog::builtin().clone()),
        PipelineSettings::default(),
    )
}

/// 黒の革ジャケット（男性）
#[tokio::test]
async fn test_black_leather_jacket_end_to_end() {
    let store = Arc::new(MemoryStore::default());
    let detector = Arc::new(CountingDetector::new(vec![
        Label::new("Black", 98.0),
        Label::new("Jacket", 91.0),
        Label::new("Leather", 80.0),
        Label::new("Person", 99.0),
    ]));
    let search = Arc::new(CannedSearch::new(
        r#"{"shopping_results": [
            {"title": "Casaca de cuero negra", "source": "Falabella", "price": "S/ 299.90", "extracted_price": 299.9},
            {"title": "Leather jacket black", "source": "ASOS", "price": "$89.00", "extracted_price": 89.0, "rating": 4.4, "reviews": 210}
        ]}"#,
    ));

    let p = pipeline(store.clone(), detector.clone(), Some(search.clone()));
    let report = p.analyze(&request("hombre")).await.unwrap();

    assert!(report.success);
    assert_eq!(report.prenda.tipo_en, "Jacket");
    assert_eq!(report.prenda.confianza, 91.0);
    assert_eq!(report.prenda.color, "Negro");
    assert_eq!(report.prenda.color_confianza, 98.0);
    assert_eq!(report.prenda.estilo, "Casual");
    assert_eq!(report.prenda.estilo_confianza, 0.0);
    assert_eq!(report.prenda.detalles, vec!["Leather"]);
    assert!(report.prenda.query_busqueda.starts_with("black leather jacket men shop"));
    assert!(report.prenda.etiquetas.iter().all(|l| l.name != "Person"));

    // specific が6件未満なので broad も検索（specific の後）
    let queries = search.queries.lock().unwrap().clone();
    assert_eq!(queries, vec!["black leather jacket men shop", "black jacket men online"]);

    // 同じ2件が両方のクエリで返るので重複排除される
    assert_eq!(report.tiendas.len(), 2);
    assert_eq!(report.tiendas[0].kind, ListingKind::Physical);
    assert_eq!(report.tiendas[1].reviews, Some(210));

    let puts = store.puts.lock().unwrap().clone();
    assert_eq!(puts.len(), 1);
    assert!(puts[0].0.starts_with("uploads/hombre/"));
    assert_eq!(puts[0].1, "fake-jpeg".len());
    assert_eq!(puts[0].2, "image/jpeg");
}

/// 複合ラベルのみ（女性）
#[tokio::test]
async fn test_floral_dress_end_to_end() {
    let detector = Arc::new(CountingDetector::new(vec![Label::new("Floral Dress", 77.0)]));
    let p = pipeline(Arc::new(MemoryStore::default()), detector, None);
    let report = p.analyze(&request("mujer")).await.unwrap();

    assert_eq!(report.prenda.tipo_en, "Dress");
    assert_eq!(report.prenda.tipo_es, "Vestido");
    assert_eq!(report.prenda.confianza, 50.0);
    assert_eq!(report.prenda.color, "No detectado");
    assert_eq!(report.prenda.detalles, vec!["Floral"]);
    assert_eq!(report.tiendas, fallback_listings("Vestido", Catalog::builtin()));
}

/// 検索が両方ともエラーを返しても成功する
#[tokio::test]
async fn test_search_errors_fall_back_without_failing() {
    let detector = Arc::new(CountingDetector::new(vec![
        Label::new("Black", 98.0),
        Label::new("Jacket", 91.0),
    ]));
    let search = Arc::new(CannedSearch::new(r#"{"error": "rate limited"}"#));
    let p = pipeline(Arc::new(MemoryStore::default()), detector, Some(search.clone()));

    let report = p.analyze(&request("hombre")).await.unwrap();
    assert!(report.success);
    assert_eq!(report.prenda.tipo_es, "Chaqueta");
    assert_eq!(report.prenda.color, "Negro");
    assert_eq!(report.tiendas, fallback_listings("Chaqueta", Catalog::builtin()));
    assert_eq!(search.queries.lock().unwrap().len(), 2);
}

/// 検証エラーでは外部サービスを呼ばない
#[tokio::test]
async fn test_validation_makes_no_external_calls() {
    let store = Arc::new(MemoryStore::default());
    let detector = Arc::new(CountingDetector::new(vec![Label::new("Shirt", 90.0)]));
    let p = pipeline(store.clone(), detector.clone(), None);

    let missing = AnalyzeRequest {
        imagen_base64: String::new(),
        genero: "hombre".into(),
    };
    let err = p.analyze(&missing).await.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.caller_message(), "Falta imagen_base64");

    let err = p.analyze(&request("unisex")).await.unwrap_err();
    assert!(err.is_client_error());

    assert!(store.puts.lock().unwrap().is_empty());
    assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
}

/// 保存の失敗はリクエスト全体の失敗（原因は呼び出し元に出さない）
#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let detector = Arc::new(CountingDetector::new(vec![Label::new("Shirt", 90.0)]));
    let p = pipeline(Arc::new(FailingStore), detector.clone(), None);

    let err = p.analyze(&request("hombre")).await.unwrap_err();
    assert!(!err.is_client_error());
    assert!(!err.caller_message().contains("arn:aws"));
    assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
}

/// ラベルが1件も残らなくてもセンチネルで完了する
#[tokio::test]
async fn test_no_usable_labels_still_completes() {
    let detector = Arc::new(CountingDetector::new(vec![
        Label::new("Person", 99.0),
        Label::new("Smile", 95.0),
    ]));
    let p = pipeline(Arc::new(MemoryStore::default()), detector, None);
    let report = p.analyze(&request("hombre")).await.unwrap();

    assert_eq!(report.prenda.tipo_es, "Prenda no identificada");
    assert_eq!(report.prenda.color, "No detectado");
    assert_eq!(report.prenda.estilo, "Casual");
    assert_eq!(report.prenda.query_busqueda, "men shop");
    assert!(report.prenda.etiquetas.is_empty());
}
