use crate::domain::model::DataSourceStatus;
use crate::utils::error::Result;
use askama::Template;

const EXCEL_SOURCE: &str = "Excel File";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
}

impl BadgeTone {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Success => "bg-success",
            BadgeTone::Warning => "bg-warning",
            BadgeTone::Danger => "bg-danger",
        }
    }
}

/// 資料來源狀態標籤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub tone: BadgeTone,
    pub icon: &'static str,
    pub text: String,
}

impl StatusBadge {
    pub fn from_status(status: &DataSourceStatus) -> Self {
        if status.sheets_connected && status.sheet_configured {
            Self {
                tone: BadgeTone::Success,
                icon: "fa-cloud",
                text: format!("Google Sheets Bağlı ({} kayıt)", status.data_count),
            }
        } else if status.data_source == EXCEL_SOURCE {
            Self {
                tone: BadgeTone::Warning,
                icon: "fa-file-excel",
                text: format!("Excel Dosyası ({} kayıt)", status.data_count),
            }
        } else {
            Self {
                tone: BadgeTone::Danger,
                icon: "fa-exclamation-triangle",
                text: "Veri Kaynağı Hatası".to_string(),
            }
        }
    }

    pub fn connection_error() -> Self {
        Self {
            tone: BadgeTone::Danger,
            icon: "fa-exclamation-triangle",
            text: "Bağlantı Hatası".to_string(),
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"<span class="badge {{ tone }}"><i class="fas {{ badge.icon }} me-1"></i>{{ badge.text }}</span>"#,
    ext = "html"
)]
struct StatusTemplate<'a> {
    badge: &'a StatusBadge,
    tone: &'static str,
}

pub fn render_status_html(badge: &StatusBadge) -> Result<String> {
    let template = StatusTemplate {
        badge,
        tone: badge.tone.css_class(),
    };
    Ok(template.render()?)
}
