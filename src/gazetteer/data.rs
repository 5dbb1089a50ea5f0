//! Built-in gazetteer tables.
//!
//! Curated from frequency analysis of Meiji/Taisho literary corpora: the
//! city table carries the district-level names that dominate that fiction
//! (Hongo, Kanda, Gion, ...), the historic table carries old provincial
//! names with the context keywords that distinguish them from surnames,
//! and the foreign table carries the western/continental cities those
//! authors actually wrote about.
//!
//! Coordinates are WGS84 decimal degrees. Confidences are per-entry base
//! confidences for the dictionary channel, not contextual judgments.

/// (name, latitude, longitude, prefecture, base confidence)
pub(crate) const CITIES: &[(&str, f64, f64, &str, f64)] = &[
    // Tokyo districts
    ("本郷", 35.7081, 139.7619, "東京都", 0.95),
    ("神田", 35.6918, 139.7648, "東京都", 0.95),
    ("青山", 35.6736, 139.7263, "東京都", 0.95),
    ("麻布", 35.6581, 139.7414, "東京都", 0.95),
    ("両国", 35.6967, 139.7933, "東京都", 0.95),
    ("赤坂", 35.6745, 139.7378, "東京都", 0.95),
    ("日本橋", 35.6813, 139.7744, "東京都", 0.95),
    ("築地", 35.6654, 139.7707, "東京都", 0.95),
    ("新橋", 35.6665, 139.7580, "東京都", 0.95),
    ("上野", 35.7136, 139.7772, "東京都", 0.95),
    ("銀座", 35.6717, 139.7650, "東京都", 0.95),
    ("新宿", 35.6938, 139.7034, "東京都", 0.95),
    ("渋谷", 35.6580, 139.7016, "東京都", 0.95),
    ("浅草", 35.7118, 139.7967, "東京都", 0.95),
    ("品川", 35.6092, 139.7302, "東京都", 0.95),
    ("池袋", 35.7295, 139.7109, "東京都", 0.95),
    // Kyoto
    ("伏見", 34.9393, 135.7578, "京都府", 0.98),
    ("嵐山", 35.0088, 135.6761, "京都府", 0.98),
    ("清水", 34.9948, 135.7849, "京都府", 0.92),
    ("祇園", 35.0037, 135.7744, "京都府", 0.98),
    ("宇治", 34.8842, 135.7991, "京都府", 0.95),
    // Osaka
    ("難波", 34.6659, 135.5020, "大阪府", 0.92),
    ("梅田", 34.7010, 135.4962, "大阪府", 0.92),
    ("心斎橋", 34.6723, 135.5002, "大阪府", 0.92),
    // Kanagawa
    ("横浜", 35.4478, 139.6425, "神奈川県", 0.95),
    ("鎌倉", 35.3197, 139.5468, "神奈川県", 0.95),
    ("箱根", 35.2322, 139.1069, "神奈川県", 0.95),
    // Other major cities
    ("柏", 35.8676, 139.9758, "千葉県", 0.90),
    ("名古屋", 35.1815, 136.9066, "愛知県", 0.95),
    ("金沢", 36.5613, 136.6562, "石川県", 0.95),
    ("仙台", 38.2682, 140.8694, "宮城県", 0.95),
    ("広島", 34.3853, 132.4553, "広島県", 0.95),
    ("神戸", 34.6901, 135.1955, "兵庫県", 0.95),
    ("奈良", 34.6851, 135.8048, "奈良県", 0.95),
    ("博多", 33.5902, 130.4207, "福岡県", 0.95),
    ("長崎", 32.7503, 129.8777, "長崎県", 0.95),
    ("鹿児島", 31.5966, 130.5571, "鹿児島県", 0.95),
    ("日光", 36.7581, 139.6014, "栃木県", 0.93),
    ("熱海", 35.0960, 139.0716, "静岡県", 0.93),
    ("軽井沢", 36.3486, 138.5810, "長野県", 0.93),
    ("松島", 38.3683, 141.0636, "宮城県", 0.93),
    // Hokkaido
    ("小樽", 43.1907, 140.9947, "北海道", 0.95),
    ("函館", 41.7687, 140.7291, "北海道", 0.95),
    ("札幌", 43.0642, 141.3469, "北海道", 0.95),
];

/// All 47 prefectures: (full name, latitude, longitude).
///
/// Both the full form (東京都) and the base form (東京) resolve here.
pub(crate) const PREFECTURES: &[(&str, f64, f64)] = &[
    ("北海道", 43.0642, 141.3469),
    ("青森県", 40.8244, 140.7400),
    ("岩手県", 39.7036, 141.1527),
    ("宮城県", 38.2682, 140.8721),
    ("秋田県", 39.7186, 140.1024),
    ("山形県", 38.2404, 140.3633),
    ("福島県", 37.7503, 140.4677),
    ("茨城県", 36.3417, 140.4468),
    ("栃木県", 36.5657, 139.8836),
    ("群馬県", 36.3911, 139.0608),
    ("埼玉県", 35.8572, 139.6489),
    ("千葉県", 35.6047, 140.1233),
    ("東京都", 35.6762, 139.6503),
    ("神奈川県", 35.4478, 139.6425),
    ("新潟県", 37.9026, 139.0235),
    ("富山県", 36.6953, 137.2113),
    ("石川県", 36.5945, 136.6256),
    ("福井県", 36.0652, 136.2216),
    ("山梨県", 35.6635, 138.5681),
    ("長野県", 36.2048, 137.9677),
    ("岐阜県", 35.3912, 136.7223),
    ("静岡県", 34.9766, 138.3831),
    ("愛知県", 35.1802, 136.9066),
    ("三重県", 34.7303, 136.5086),
    ("滋賀県", 35.0045, 135.8686),
    ("京都府", 35.0116, 135.7681),
    ("大阪府", 34.6937, 135.5023),
    ("兵庫県", 34.6913, 135.1830),
    ("奈良県", 34.6851, 135.8325),
    ("和歌山県", 34.2261, 135.1675),
    ("鳥取県", 35.5038, 134.2381),
    ("島根県", 35.4722, 133.0505),
    ("岡山県", 34.6617, 133.9345),
    ("広島県", 34.3966, 132.4596),
    ("山口県", 34.1861, 131.4706),
    ("徳島県", 34.0658, 134.5590),
    ("香川県", 34.3401, 134.0434),
    ("愛媛県", 33.8416, 132.7658),
    ("高知県", 33.5597, 133.5311),
    ("福岡県", 33.6064, 130.4181),
    ("佐賀県", 33.2494, 130.2989),
    ("長崎県", 32.7448, 129.8737),
    ("熊本県", 32.7898, 130.7417),
    ("大分県", 33.2382, 131.6126),
    ("宮崎県", 31.9111, 131.4239),
    ("鹿児島県", 31.5966, 130.5571),
    ("沖縄県", 26.2124, 127.6792),
];

/// Base confidence applied to every prefecture hit.
pub(crate) const PREFECTURE_CONFIDENCE: f64 = 0.95;

/// Historic provincial names: (name, latitude, longitude, modern
/// equivalent, context keywords that mark classical usage).
///
/// A keyword hit anywhere in the 3-sentence window force-accepts the
/// candidate even when ordinary cue scoring would reject it.
pub(crate) const HISTORIC_PROVINCES: &[(&str, f64, f64, &str, &[&str])] = &[
    (
        "江戸",
        35.6762,
        139.6503,
        "東京都",
        &["幕府", "将軍", "城下", "時代", "町"],
    ),
    (
        "平安京",
        35.0116,
        135.7681,
        "京都府",
        &["都", "遷都", "御所", "貴族"],
    ),
    (
        "伊勢",
        34.4900,
        136.7056,
        "三重県伊勢市",
        &["神宮", "参拝", "旅", "国", "物語"],
    ),
    (
        "大和",
        34.6851,
        135.8325,
        "奈良県",
        &["国", "古都", "都", "平城京"],
    ),
    (
        "美濃",
        35.3912,
        136.7223,
        "岐阜県",
        &["国", "関ヶ原", "木曽川"],
    ),
    (
        "尾張",
        35.1802,
        136.9066,
        "愛知県",
        &["国", "名古屋", "織田"],
    ),
    (
        "薩摩",
        31.5966,
        130.5571,
        "鹿児島県",
        &["国", "島津", "九州"],
    ),
    (
        "伊豆",
        34.9756,
        138.9462,
        "静岡県",
        &["国", "半島", "温泉", "流罪"],
    ),
    ("甲斐", 35.6635, 138.5681, "山梨県", &["国", "武田", "山"]),
    (
        "信濃",
        36.2048,
        137.9677,
        "長野県",
        &["国", "木曽", "善光寺"],
    ),
    ("越後", 37.9026, 139.0235, "新潟県", &["国", "雪", "上杉"]),
    ("近江", 35.0045, 135.8686, "滋賀県", &["国", "琵琶湖"]),
    (
        "武蔵",
        35.6762,
        139.6503,
        "東京都",
        &["国", "野", "府中"],
    ),
    ("相模", 35.4478, 139.6425, "神奈川県", &["国", "湾"]),
];

/// Base confidence for historic-province hits in the geocode tier.
pub(crate) const HISTORIC_CONFIDENCE: f64 = 0.85;

/// Fixed confidence for a classifier force-accept on historic context.
pub(crate) const HISTORIC_OVERRIDE_CONFIDENCE: f64 = 0.9;

/// Literary landmarks: (name, latitude, longitude, prefecture).
pub(crate) const LANDMARKS: &[(&str, f64, f64, &str)] = &[
    ("伊勢神宮", 34.4550, 136.7256, "三重県"),
    ("金閣寺", 35.0394, 135.7292, "京都府"),
    ("清水寺", 34.9949, 135.7851, "京都府"),
    ("浅草寺", 35.7148, 139.7967, "東京都"),
    ("明治神宮", 35.6764, 139.6993, "東京都"),
    ("善光寺", 36.6617, 138.1878, "長野県"),
    ("比叡山", 35.0706, 135.8378, "滋賀県"),
    ("高野山", 34.2130, 135.5847, "和歌山県"),
    ("富士山", 35.3606, 138.7274, "静岡県"),
    ("琵琶湖", 35.2590, 136.1360, "滋賀県"),
    ("隅田川", 35.7107, 139.8012, "東京都"),
    ("道頓堀", 34.6687, 135.5013, "大阪府"),
];

/// Base confidence for landmark hits.
pub(crate) const LANDMARK_CONFIDENCE: f64 = 0.90;

/// Foreign places frequent in literary text: (name, latitude, longitude,
/// country).
pub(crate) const FOREIGN_PLACES: &[(&str, f64, f64, &str)] = &[
    ("ローマ", 41.9028, 12.4964, "イタリア"),
    ("パリ", 48.8566, 2.3522, "フランス"),
    ("ロンドン", 51.5074, -0.1278, "イギリス"),
    ("ベルリン", 52.5200, 13.4050, "ドイツ"),
    ("ニューヨーク", 40.7128, -74.0060, "アメリカ"),
    ("上海", 31.2304, 121.4737, "中国"),
    ("ペキン", 39.9042, 116.4074, "中国"),
    ("北京", 39.9042, 116.4074, "中国"),
    ("モスクワ", 55.7558, 37.6176, "ロシア"),
    ("ウィーン", 48.2082, 16.3738, "オーストリア"),
    ("アテネ", 37.9838, 23.7275, "ギリシャ"),
    ("ペテルブルク", 59.9311, 30.3609, "ロシア"),
];

/// Base confidence for foreign-place hits.
pub(crate) const FOREIGN_CONFIDENCE: f64 = 0.90;

/// Surnames that double as place names: (name, prior person-likelihood,
/// canonical place reading, prefecture).
///
/// A prior above 0.5 makes the name vetoable: any person cue in context
/// rejects it outright. Lower priors keep the entry for normalization
/// hints only.
pub(crate) const AMBIGUOUS_SURNAMES: &[(&str, f64, &str, &str)] = &[
    ("柏", 0.8, "柏", "千葉県"),
    ("清水", 0.7, "清水", "静岡県"),
    ("青山", 0.6, "青山", "東京都"),
    ("本郷", 0.3, "本郷", "東京都"),
    ("神田", 0.3, "神田", "東京都"),
    ("両国", 0.3, "両国", "東京都"),
    ("麻布", 0.3, "麻布", "東京都"),
    ("伏見", 0.3, "伏見", "京都府"),
    ("嵐山", 0.3, "嵐山", "京都府"),
    ("松本", 0.7, "松本", "長野県"),
    ("石川", 0.7, "石川", "石川県"),
];

/// Prior threshold above which a person-cue hit vetoes the candidate.
pub(crate) const AMBIGUOUS_VETO_PRIOR: f64 = 0.5;

/// Orthographic aliases: (variant, canonical form).
///
/// Classical abbreviations (〜州) and spelling variants fold to the
/// canonical entry before any table lookup.
pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("ペキン", "北京"),
    ("大坂", "大阪"),
    ("東京市", "東京"),
    ("江州", "近江"),
    ("勢州", "伊勢"),
    ("豆州", "伊豆"),
    ("信州", "信濃"),
    ("甲州", "甲斐"),
    ("薩州", "薩摩"),
    ("武州", "武蔵"),
    ("相州", "相模"),
    ("尾州", "尾張"),
    ("濃州", "美濃"),
    ("越州", "越後"),
];

/// Exact surface forms rejected by every channel.
pub(crate) const EXCLUDED_TEMPORAL: &[&str] = &[
    "今日", "昨日", "明日", "一昨日", "明後日", "今夜", "今朝", "夕方", "早朝", "深夜", "午前",
    "午後", "正月", "先日", "最近",
];

/// Directional/relative words rejected by every channel.
pub(crate) const EXCLUDED_DIRECTIONAL: &[&str] = &[
    "こちら", "そちら", "あちら", "どちら", "ここ", "そこ", "あそこ", "どこ", "前後", "左右",
    "上下", "内外",
];

/// Generic nouns that the suffix patterns would otherwise match.
pub(crate) const EXCLUDED_GENERIC: &[&str] = &[
    "山道", "都市", "文藝都市", "野原", "町中", "村里", "海辺", "山奥", "田舎",
];

/// Suffixes that mark a pattern match as an organization/time/shape word
/// rather than a place (店, 屋, 時, 中, ...).
pub(crate) const REJECT_SUFFIX_CHARS: &[char] = &[
    '店', '屋', '社', '会', '館', '部', '課', '室', '科', '組', '時', '分', '秒', '日', '月',
    '年', '前', '後', '左', '右', '上', '下', '中', '内', '外', '大', '小', '高', '低', '長',
    '短', '新', '旧',
];

/// Numeric leading characters that disqualify a pattern match.
pub(crate) const REJECT_PREFIX_CHARS: &[char] = &[
    '一', '二', '三', '四', '五', '六', '七', '八', '九', '十',
];

/// Single-codepoint names exempt from the 2-codepoint minimum.
pub(crate) const SHORT_NAME_WHITELIST: &[&str] = &["柏", "堺", "津", "灘", "萩"];
