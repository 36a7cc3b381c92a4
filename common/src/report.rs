//! 呼び出し元へ返すレスポンスの組み立て

use crate::catalog::Catalog;
use crate::listing::{Listing, ResultSet};
use crate::query::QueryPair;
use crate::resolver::Resolution;
use crate::types::{Audience, LabelView};
use serde::{Deserialize, Serialize};

/// 表示するラベルの上限
pub const LABEL_DISPLAY_CAP: usize = 10;

/// 衣料品として案内するサイズ
pub const REPORT_SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

/// 衣料品の解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentReport {
    /// 種別（スペイン語）
    pub tipo_es: String,
    /// 種別コード（英語）
    pub tipo_en: String,
    pub color: String,
    pub color_confianza: f64,
    pub estilo: String,
    pub estilo_confianza: f64,
    pub material_estimado: String,
    /// 種別の信頼度（小数1桁）
    pub confianza: f64,
    pub cuando_usar: String,
    pub ocasion: Vec<String>,
    pub tallas_disponibles: Vec<String>,
    pub precio_min: u32,
    pub precio_max: u32,
    pub detalles: Vec<String>,
    pub etiquetas: Vec<LabelView>,
    pub query_busqueda: String,
}

/// 成功レスポンス全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleReport {
    pub success: bool,
    pub genero: Audience,
    pub prenda: GarmentReport,
    pub tiendas: Vec<Listing>,
}

/// 解決結果・クエリ・検索結果からレスポンスを作る
///
/// # Arguments
/// * `resolution` - 属性解決の結果
/// * `queries` - 生成したクエリ（specific を表示に使う）
/// * `results` - 集約済みの検索結果
/// * `audience` - 対象
/// * `catalog` - 素材・価格帯・着用シーンの参照先
pub fn build_report(
    resolution: &Resolution,
    queries: &QueryPair,
    results: ResultSet,
    audience: Audience,
    catalog: &Catalog,
) -> StyleReport {
    let garment = &resolution.garment;
    let style_display = resolution.style.display.as_str();
    let band = catalog.price_band_for(&garment.code);

    let prenda = GarmentReport {
        tipo_es: garment.display.clone(),
        tipo_en: garment.code.clone(),
        color: resolution.color.display.clone(),
        color_confianza: resolution.color.rounded_confidence(),
        estilo: style_display.to_string(),
        estilo_confianza: resolution.style.rounded_confidence(),
        material_estimado: catalog.material_for(&garment.code).to_string(),
        confianza: garment.rounded_confidence(),
        cuando_usar: catalog.when_to_wear_for(style_display).to_string(),
        ocasion: catalog.occasions_for(style_display).to_vec(),
        tallas_disponibles: REPORT_SIZES.iter().map(|s| s.to_string()).collect(),
        precio_min: band.min,
        precio_max: band.max,
        detalles: resolution.descriptors.display_codes(),
        etiquetas: resolution
            .labels
            .iter()
            .take(LABEL_DISPLAY_CAP)
            .cloned()
            .collect(),
        query_busqueda: queries.specific.to_string(),
    };

    StyleReport {
        success: true,
        genero: audience,
        prenda,
        tiendas: results.listings,
    }
}
