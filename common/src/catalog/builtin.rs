//! 組み込みカタログデータ
//!
//! 語彙のキーは検出サービスの英語ラベル、表示はリマ向けのスペイン語。
//! 並び順は部分一致で同じ長さの語が競合したときの優先順になる。

use super::DescriptorKind;

pub(super) const GARMENTS_MEN: &[(&str, &str)] = &[
    ("Shirt", "Camisa"),
    ("T-Shirt", "Polo / Camiseta"),
    ("Polo Shirt", "Polo"),
    ("Pants", "Pantalón"),
    ("Jeans", "Jean"),
    ("Jacket", "Chaqueta"),
    ("Hoodie", "Hoodie / Polera"),
    ("Sweatshirt", "Polerón"),
    ("Sweater", "Suéter"),
    ("Coat", "Abrigo"),
    ("Blazer", "Blazer"),
    ("Vest", "Chaleco"),
    ("Shorts", "Short"),
    ("Tank Top", "Bividí"),
    ("Sneakers", "Zapatillas"),
    ("Boots", "Botas"),
    ("Shoe", "Zapatos"),
    ("Suit", "Traje"),
];

pub(super) const GARMENTS_WOMEN: &[(&str, &str)] = &[
    ("Dress", "Vestido"),
    ("Skirt", "Falda"),
    ("Blouse", "Blusa"),
    ("Top", "Top"),
    ("T-Shirt", "Polo / Camiseta"),
    ("Leggings", "Leggings"),
    ("Jeans", "Jean"),
    ("Pants", "Pantalón"),
    ("Shorts", "Short"),
    ("Cardigan", "Cardigan"),
    ("Sweater", "Suéter"),
    ("Jacket", "Chaqueta"),
    ("Blazer", "Blazer"),
    ("Coat", "Abrigo"),
    ("Jumpsuit", "Enterizo"),
    ("Swimwear", "Ropa de baño"),
    ("Heels", "Tacones"),
    ("Sandals", "Sandalias"),
    ("Sneakers", "Zapatillas"),
    ("Boots", "Botas"),
];

pub(super) const COLORS: &[(&str, &str)] = &[
    ("Black", "Negro"),
    ("White", "Blanco"),
    ("Red", "Rojo"),
    ("Blue", "Azul"),
    ("Navy", "Azul marino"),
    ("Green", "Verde"),
    ("Olive", "Verde olivo"),
    ("Gray", "Gris"),
    ("Grey", "Gris"),
    ("Brown", "Marrón"),
    ("Pink", "Rosado"),
    ("Yellow", "Amarillo"),
    ("Purple", "Morado"),
    ("Orange", "Naranja"),
    ("Beige", "Beige"),
    ("Khaki", "Caqui"),
    ("Burgundy", "Guinda"),
    ("Cream", "Crema"),
    ("Gold", "Dorado"),
    ("Silver", "Plateado"),
];

pub(super) const STYLES: &[(&str, &str)] = &[
    ("Casual", "Casual"),
    ("Formal", "Formal"),
    ("Sportswear", "Deportivo"),
    ("Elegant", "Elegante"),
    ("Urban", "Urbano"),
    ("Streetwear", "Urbano"),
    ("Vintage", "Vintage"),
    ("Bohemian", "Bohemio"),
];

/// (ラベル語, 正規コード, 種類)
pub(super) const DESCRIPTORS: &[(&str, &str, DescriptorKind)] = &[
    // 素材
    ("Leather", "Leather", DescriptorKind::Material),
    ("Denim", "Denim", DescriptorKind::Material),
    ("Cotton", "Cotton", DescriptorKind::Material),
    ("Wool", "Wool", DescriptorKind::Material),
    ("Silk", "Silk", DescriptorKind::Material),
    ("Linen", "Linen", DescriptorKind::Material),
    ("Suede", "Suede", DescriptorKind::Material),
    ("Velvet", "Velvet", DescriptorKind::Material),
    ("Satin", "Satin", DescriptorKind::Material),
    ("Lace", "Lace", DescriptorKind::Material),
    ("Corduroy", "Corduroy", DescriptorKind::Material),
    ("Fleece", "Fleece", DescriptorKind::Material),
    ("Knit", "Knit", DescriptorKind::Material),
    ("Knitwear", "Knit", DescriptorKind::Material),
    ("Tweed", "Tweed", DescriptorKind::Material),
    ("Chiffon", "Chiffon", DescriptorKind::Material),
    // 柄
    ("Floral", "Floral", DescriptorKind::Pattern),
    ("Stripe", "Striped", DescriptorKind::Pattern),
    ("Stripes", "Striped", DescriptorKind::Pattern),
    ("Striped", "Striped", DescriptorKind::Pattern),
    ("Plaid", "Plaid", DescriptorKind::Pattern),
    ("Tartan", "Plaid", DescriptorKind::Pattern),
    ("Checkered", "Checkered", DescriptorKind::Pattern),
    ("Gingham", "Checkered", DescriptorKind::Pattern),
    ("Polka Dot", "Polka Dot", DescriptorKind::Pattern),
    ("Camouflage", "Camouflage", DescriptorKind::Pattern),
    ("Camo", "Camouflage", DescriptorKind::Pattern),
    ("Leopard", "Animal Print", DescriptorKind::Pattern),
    ("Animal Print", "Animal Print", DescriptorKind::Pattern),
    ("Paisley", "Paisley", DescriptorKind::Pattern),
    // シルエット
    ("Slim", "Slim Fit", DescriptorKind::Fit),
    ("Slim Fit", "Slim Fit", DescriptorKind::Fit),
    ("Oversized", "Oversized", DescriptorKind::Fit),
    ("Skinny", "Skinny", DescriptorKind::Fit),
    ("Cropped", "Cropped", DescriptorKind::Fit),
    ("Loose", "Loose", DescriptorKind::Fit),
    ("Fitted", "Fitted", DescriptorKind::Fit),
    ("Relaxed", "Relaxed", DescriptorKind::Fit),
    ("Tailored", "Tailored", DescriptorKind::Fit),
    // 仕立て・ディテール
    ("Zipper", "Zipper", DescriptorKind::Detail),
    ("Button", "Button", DescriptorKind::Detail),
    ("Buttons", "Button", DescriptorKind::Detail),
    ("Hooded", "Hooded", DescriptorKind::Detail),
    ("Pocket", "Pocket", DescriptorKind::Detail),
    ("Pockets", "Pocket", DescriptorKind::Detail),
    ("Collar", "Collar", DescriptorKind::Detail),
    ("V-Neck", "V-Neck", DescriptorKind::Detail),
    ("Turtleneck", "Turtleneck", DescriptorKind::Detail),
    ("Sleeveless", "Sleeveless", DescriptorKind::Detail),
    ("Long Sleeve", "Long Sleeve", DescriptorKind::Detail),
    ("Short Sleeve", "Short Sleeve", DescriptorKind::Detail),
    ("Ruffle", "Ruffle", DescriptorKind::Detail),
    ("Ruffles", "Ruffle", DescriptorKind::Detail),
    ("Pleated", "Pleated", DescriptorKind::Detail),
    ("Embroidered", "Embroidered", DescriptorKind::Detail),
    ("Ripped", "Ripped", DescriptorKind::Detail),
    ("Distressed", "Ripped", DescriptorKind::Detail),
    // 小物
    ("Belt", "Belt", DescriptorKind::Accessory),
    ("Scarf", "Scarf", DescriptorKind::Accessory),
    ("Hat", "Hat", DescriptorKind::Accessory),
    ("Handbag", "Handbag", DescriptorKind::Accessory),
    ("Sunglasses", "Sunglasses", DescriptorKind::Accessory),
    ("Tie", "Tie", DescriptorKind::Accessory),
    ("Jewelry", "Jewelry", DescriptorKind::Accessory),
    ("Necklace", "Jewelry", DescriptorKind::Accessory),
];

pub(super) const MATERIALS: &[(&str, &str)] = &[
    ("T-Shirt", "Algodón"),
    ("Polo Shirt", "Algodón / Piqué"),
    ("Shirt", "Algodón / Poliéster"),
    ("Jeans", "Denim / Algodón"),
    ("Pants", "Algodón / Poliéster"),
    ("Jacket", "Poliéster / Nylon"),
    ("Hoodie", "Algodón / Poliéster"),
    ("Sweatshirt", "Algodón / Poliéster"),
    ("Sweater", "Lana / Acrílico"),
    ("Coat", "Lana / Poliéster"),
    ("Blazer", "Lana / Poliéster"),
    ("Vest", "Poliéster / Algodón"),
    ("Shorts", "Algodón / Nylon"),
    ("Tank Top", "Algodón"),
    ("Sneakers", "Sintético / Mesh"),
    ("Boots", "Cuero / Sintético"),
    ("Shoe", "Cuero"),
    ("Suit", "Lana / Poliéster"),
    ("Dress", "Poliéster / Algodón"),
    ("Skirt", "Poliéster / Algodón"),
    ("Blouse", "Seda / Poliéster"),
    ("Top", "Algodón / Lycra"),
    ("Leggings", "Lycra / Spandex"),
    ("Cardigan", "Lana / Acrílico"),
    ("Heels", "Cuero sintético"),
    ("Sandals", "Cuero / Sintético"),
    ("Jumpsuit", "Poliéster / Algodón"),
    ("Swimwear", "Lycra / Nylon"),
];

/// 推定価格帯（PEN）
pub(super) const PRICE_BANDS: &[(&str, u32, u32)] = &[
    ("T-Shirt", 25, 120),
    ("Polo Shirt", 35, 150),
    ("Shirt", 60, 250),
    ("Jeans", 80, 350),
    ("Pants", 70, 300),
    ("Jacket", 120, 500),
    ("Hoodie", 80, 250),
    ("Sweatshirt", 70, 220),
    ("Sweater", 70, 280),
    ("Coat", 200, 800),
    ("Blazer", 180, 650),
    ("Vest", 60, 220),
    ("Shorts", 40, 150),
    ("Tank Top", 20, 80),
    ("Sneakers", 150, 600),
    ("Boots", 180, 700),
    ("Shoe", 120, 450),
    ("Suit", 300, 1500),
    ("Dress", 80, 400),
    ("Skirt", 50, 200),
    ("Blouse", 50, 200),
    ("Top", 30, 120),
    ("Leggings", 40, 150),
    ("Cardigan", 70, 250),
    ("Heels", 100, 450),
    ("Sandals", 60, 250),
    ("Jumpsuit", 100, 350),
    ("Swimwear", 60, 250),
];

/// スタイル表示名 → 着用シーン
pub(super) const OCCASIONS: &[(&str, &[&str])] = &[
    ("Casual", &["Día casual", "Fin de semana", "Salida con amigos"]),
    ("Formal", &["Reunión de trabajo", "Evento corporativo", "Cena formal"]),
    ("Deportivo", &["Gimnasio", "Running", "Actividad al aire libre"]),
    ("Elegante", &["Fiesta", "Cena especial", "Evento social"]),
    ("Urbano", &["Street style", "Salida nocturna", "Día casual"]),
    ("Vintage", &["Feria de diseño", "Salida cultural", "Fin de semana"]),
    ("Bohemio", &["Festival", "Viaje de playa", "Brunch"]),
];

pub(super) const WHEN_TO_WEAR: &[(&str, &str)] = &[
    ("Casual", "Ideal para días relajados, salidas informales o el fin de semana."),
    ("Formal", "Perfecto para reuniones de trabajo, entrevistas o eventos corporativos."),
    ("Deportivo", "Diseñado para actividad física, gimnasio o deporte al aire libre."),
    ("Elegante", "Ideal para fiestas, cenas especiales o eventos donde quieras destacar."),
    ("Urbano", "Perfecto para el día a día con un toque moderno y street style."),
    ("Vintage", "Ideal para looks con personalidad inspirados en otras décadas."),
    ("Bohemio", "Perfecto para festivales, viajes y días de sol con estilo relajado."),
];

/// 属性にも表示にも使わないラベル
pub(super) const NOISE: &[&str] = &[
    "Person", "Human", "Adult", "Man", "Woman", "Male", "Female", "Boy", "Girl",
    "Child", "Kid", "Teen", "Face", "Head", "Photography", "Portrait", "Selfie",
    "Indoors", "Outdoors", "Standing", "Sitting", "Smile", "Finger", "Hand", "Arm",
    "Body Part", "Skin", "Hair", "Neck", "Shoulder", "Photo", "Clothing", "Apparel",
    "Fashion", "Text",
];

/// (ソース名の断片, 実店舗か, ロケーション)
pub(super) const KNOWN_STORES: &[(&str, bool, &str)] = &[
    ("falabella", true, "Jockey Plaza · San Isidro · Miraflores · Mall del Sur"),
    ("ripley", true, "Jockey Plaza · San Miguel · Mega Plaza · Mall del Sur"),
    ("oechsle", true, "Real Plaza Salaverry · Jockey Plaza · Plaza Norte"),
    ("h&m", true, "Jockey Plaza · Real Plaza Salaverry"),
    ("hm", true, "Jockey Plaza · Real Plaza Salaverry"),
    ("zara", true, "Jockey Plaza · Real Plaza Salaverry"),
    ("marathon", true, "Jockey Plaza · Real Plaza · Mall del Sur · Plaza Norte"),
    ("footloose", true, "Jockey Plaza · Mega Plaza · Mall Aventura"),
    ("platanitos", true, "Jockey Plaza · Real Plaza · Mall del Sur"),
    ("topitop", true, "Gamarra · Mega Plaza · Plaza Norte · Mall del Sur"),
    ("passarela", true, "Lima, Perú"),
    ("bata", true, "Lima, Perú"),
    ("gamarra", true, "Gamarra, La Victoria"),
    ("paris", true, "Lima, Perú"),
    ("pillin", true, "Lima, Perú"),
    ("mercado libre", false, "Envío a todo Lima"),
    ("linio", false, "Envío a todo Lima"),
];

/// 検索が使えないときの代替ストア（名前, リンク）
pub(super) const FALLBACK_STORES: &[(&str, &str)] = &[
    ("Amazon", "https://www.amazon.com"),
    ("ASOS", "https://www.asos.com"),
    ("Zara", "https://www.zara.com/pe"),
    ("H&M", "https://www2.hm.com/es_pe"),
    ("Shein", "https://www.shein.com"),
    ("Mercado Libre", "https://www.mercadolibre.com.pe"),
];
