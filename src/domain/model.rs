use serde::{Deserialize, Deserializer, Serialize};

/// 國家欄位缺漏時顯示的預設值
pub const DEFAULT_COUNTRY: &str = "Türkiye";

/// API 回傳的一筆大學 / 學程資料。客戶端不做驗證，只負責顯示。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramRecord {
    #[serde(rename = "Üniversite Adı", default)]
    pub university: Option<String>,

    #[serde(
        rename = "Program Kodu",
        default,
        deserialize_with = "deserialize_code"
    )]
    pub program_code: Option<String>,

    #[serde(rename = "Ülke", default)]
    pub country: Option<String>,

    #[serde(rename = "Şehir", default)]
    pub city: Option<String>,

    #[serde(rename = "Fakülte Adı", default)]
    pub faculty: Option<String>,

    #[serde(rename = "Program Adı", default)]
    pub program: Option<String>,

    #[serde(rename = "Grup", default)]
    pub group: Option<String>,

    #[serde(rename = "Kontenjan", default)]
    pub quota: Option<serde_json::Value>,

    #[serde(rename = "2024 YKS En Küçük Puanı", default)]
    pub score: Option<serde_json::Value>,

    #[serde(rename = "2024 Başarı Sırası", default)]
    pub ranking: Option<serde_json::Value>,

    #[serde(rename = "Başarı Sırası Aralığı", default)]
    pub ranking_range: Option<serde_json::Value>,

    #[serde(rename = "Tür", default)]
    pub program_type: Option<String>,

    #[serde(rename = "Link", default)]
    pub link: Option<String>,
}

impl ProgramRecord {
    pub fn country_or_default(&self) -> &str {
        match self.country.as_deref() {
            Some(country) if !country.trim().is_empty() => country,
            _ => DEFAULT_COUNTRY,
        }
    }

    pub fn university_name(&self) -> &str {
        self.university.as_deref().unwrap_or_default()
    }

    pub fn code(&self) -> &str {
        self.program_code.as_deref().unwrap_or_default()
    }
}

// Program Kodu 在資料表中可能是數字也可能是字串
fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.trim().to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// 把任意 JSON 儲存格轉成顯示字串，null 或缺漏時顯示 `-`
pub fn display_cell(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => "-".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => display_number(n),
        Some(other) => other.to_string(),
    }
}

// 後端把數值欄位轉成 float，`80.0` 要顯示成 `80`
fn display_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

pub fn display_text(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

/// `/api/filtreler` 與 `/api/dinamik-filtreler` 的回應
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub ulkeler: Vec<String>,
    pub sehirler: Vec<String>,
    pub gruplar: Vec<String>,
    pub turler: Vec<String>,
}

/// `/api/status` 的回應
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceStatus {
    pub sheets_connected: bool,
    pub sheet_configured: bool,
    pub data_source: String,
    pub data_count: u64,
}
