use crate::domain::model::{display_cell, display_text, ProgramRecord};
use crate::utils::error::Result;
use askama::Template;

pub const LOADING_MESSAGE: &str = "Üniversiteler yükleniyor...";
pub const EMPTY_TITLE: &str = "Sonuç bulunamadı";
pub const EMPTY_HINT: &str = "Arama kriterlerinizi değiştirmeyi deneyin.";
pub const LIST_ERROR: &str = "Üniversiteler yüklenirken bir hata oluştu.";
pub const FILTERS_ERROR: &str = "Filtreler yüklenirken bir hata oluştu.";
pub const DETAIL_ERROR: &str = "Üniversite detayları yüklenirken bir hata oluştu.";

/// 一張結果卡片需要的顯示資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramCard {
    pub program_code: String,
    pub university: String,
    pub country: String,
    pub city: String,
    pub faculty: String,
    pub program: String,
    pub quota: String,
    pub score: String,
    pub ranking: String,
    pub ranking_range: String,
    pub program_type: String,
    pub link: Option<String>,
}

impl From<&ProgramRecord> for ProgramCard {
    fn from(record: &ProgramRecord) -> Self {
        Self {
            program_code: record.code().to_string(),
            university: display_text(record.university.as_deref()),
            country: record.country_or_default().to_string(),
            city: display_text(record.city.as_deref()),
            faculty: display_text(record.faculty.as_deref()),
            program: display_text(record.program.as_deref()),
            quota: display_cell(record.quota.as_ref()),
            score: display_cell(record.score.as_ref()),
            ranking: display_cell(record.ranking.as_ref()),
            ranking_range: display_cell(record.ranking_range.as_ref()),
            program_type: display_text(record.program_type.as_deref()),
            link: record.link.clone().filter(|l| !l.trim().is_empty()),
        }
    }
}

/// 結果區塊的顯示狀態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Idle,
    Loading,
    Empty,
    Error(String),
    Programs(Vec<ProgramCard>),
}

impl ResultsView {
    pub fn from_records(records: &[ProgramRecord]) -> Self {
        if records.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Programs(records.iter().map(ProgramCard::from).collect())
        }
    }

    pub fn error(message: &str) -> Self {
        ResultsView::Error(message.to_string())
    }

    pub fn cards(&self) -> &[ProgramCard] {
        match self {
            ResultsView::Programs(cards) => cards,
            _ => &[],
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"
{% for card in cards %}
        <div class="university-card" data-program-kodu="{{ card.program_code }}">
            <div class="university-name">
                <i class="fas fa-university me-2 text-primary"></i>
                {{ card.university }}
            </div>
            <div class="university-info">
                <div class="row">
                    <div class="col-md-3">
                        <i class="fas fa-globe me-1"></i>
                        <strong>Ülke:</strong> {{ card.country }}
                    </div>
                    <div class="col-md-3">
                        <i class="fas fa-map-marker-alt me-1"></i>
                        <strong>Şehir:</strong> {{ card.city }}
                    </div>
                    <div class="col-md-3">
                        <i class="fas fa-graduation-cap me-1"></i>
                        <strong>Fakülte:</strong> {{ card.faculty }}
                    </div>
                    <div class="col-md-3">
                        <i class="fas fa-users me-1"></i>
                        <strong>Kontenjan:</strong> {{ card.quota }}
                    </div>
                </div>
                <div class="row mt-2">
                    <div class="col-md-6">
                        <i class="fas fa-book me-1"></i>
                        <strong>Program:</strong> {{ card.program }}
                    </div>
                    <div class="col-md-6">
                        <i class="fas fa-tag me-1"></i>
                        <strong>Tür:</strong> {{ card.program_type }}
                    </div>
                </div>
                <div class="row mt-2">
                    <div class="col-md-4">
                        <i class="fas fa-chart-line me-1"></i>
                        <strong>2024 Puanı:</strong> {{ card.score }}
                    </div>
                    <div class="col-md-4">
                        <i class="fas fa-trophy me-1"></i>
                        <strong>Başarı Sırası:</strong> {{ card.ranking }}
                    </div>
                    <div class="col-md-4">
                        <i class="fas fa-arrows-alt-h me-1"></i>
                        <strong>Sıra Aralığı:</strong> {{ card.ranking_range }}
                    </div>
                </div>
                {% match card.link %}{% when Some with (link) %}
                <div class="row mt-2">
                    <div class="col-md-12">
                        <i class="fas fa-external-link-alt me-1"></i>
                        <a href="{{ link }}" target="_blank" rel="noopener">Bağlantı</a>
                    </div>
                </div>
                {% when None %}{% endmatch %}
            </div>
        </div>
{% endfor %}"#,
    ext = "html"
)]
struct CardsTemplate<'a> {
    cards: &'a [ProgramCard],
}

#[derive(Template)]
#[template(
    source = r#"
        <div class="loading">
            <i class="fas fa-spinner fa-spin fa-2x mb-3"></i>
            <p>{{ message }}</p>
        </div>"#,
    ext = "html"
)]
struct LoadingTemplate<'a> {
    message: &'a str,
}

/// 空結果與錯誤共用的置中訊息
#[derive(Template)]
#[template(
    source = r#"
        <div class="text-center py-5">
            <i class="fas {{ icon }} fa-3x {{ tone }} mb-3"></i>
            <h4 class="{{ tone }}">{{ title }}</h4>
            <p class="text-muted">{{ message }}</p>
        </div>"#,
    ext = "html"
)]
struct NoticeTemplate<'a> {
    icon: &'a str,
    tone: &'a str,
    title: &'a str,
    message: &'a str,
}

pub fn render_results_html(view: &ResultsView) -> Result<String> {
    let html = match view {
        ResultsView::Idle => String::new(),
        ResultsView::Loading => LoadingTemplate {
            message: LOADING_MESSAGE,
        }
        .render()?,
        ResultsView::Empty => NoticeTemplate {
            icon: "fa-search",
            tone: "text-muted",
            title: EMPTY_TITLE,
            message: EMPTY_HINT,
        }
        .render()?,
        ResultsView::Error(message) => NoticeTemplate {
            icon: "fa-exclamation-triangle",
            tone: "text-danger",
            title: "Hata",
            message,
        }
        .render()?,
        ResultsView::Programs(cards) => CardsTemplate { cards }.render()?,
    };
    Ok(html)
}

pub fn render_results_text(view: &ResultsView) -> String {
    match view {
        ResultsView::Idle => String::new(),
        ResultsView::Loading => LOADING_MESSAGE.to_string(),
        ResultsView::Empty => format!("{}. {}", EMPTY_TITLE, EMPTY_HINT),
        ResultsView::Error(message) => format!("Hata: {}", message),
        ResultsView::Programs(cards) => cards
            .iter()
            .map(|card| {
                format!(
                    "[{}] {} | {} | {} | {}, {} | Kontenjan: {} | Puan: {} | Sıra: {}",
                    card.program_code,
                    card.university,
                    card.faculty,
                    card.program,
                    card.city,
                    card.country,
                    card.quota,
                    card.score,
                    card.ranking
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProgramRecord {
        serde_json::from_value(serde_json::json!({
            "Üniversite Adı": "Koç <Üniversitesi>",
            "Program Kodu": "203910123",
            "Şehir": "İstanbul",
            "Fakülte Adı": "Mühendislik Fakültesi",
            "Program Adı": "Bilgisayar Mühendisliği",
            "Kontenjan": 80,
            "2024 YKS En Küçük Puanı": 512.25,
            "2024 Başarı Sırası": 900,
            "Link": "https://example.com/ku?a=1&b=2"
        }))
        .unwrap()
    }

    #[test]
    fn test_card_defaults_country_and_escapes_markup() {
        let view = ResultsView::from_records(&[record()]);
        let card = &view.cards()[0];
        assert_eq!(card.country, "Türkiye");
        assert_eq!(card.program_type, "-");

        let html = render_results_html(&view).unwrap();
        assert!(html.contains("Koç &lt;Üniversitesi&gt;"));
        assert!(html.contains(r#"data-program-kodu="203910123""#));
        assert!(html.contains("<strong>Ülke:</strong> Türkiye"));
        assert!(html.contains("a=1&amp;b=2"));
        assert_eq!(html.matches("university-card").count(), 1);
    }

    #[test]
    fn test_empty_is_not_an_error() {
        let view = ResultsView::from_records(&[]);
        assert_eq!(view, ResultsView::Empty);

        let html = render_results_html(&view).unwrap();
        assert!(html.contains(EMPTY_TITLE));
        assert!(!html.contains("text-danger"));
        assert_eq!(render_results_html(&ResultsView::Idle).unwrap(), "");
    }

    #[test]
    fn test_error_and_text_rendering() {
        let html = render_results_html(&ResultsView::error(LIST_ERROR)).unwrap();
        assert!(html.contains("text-danger"));
        assert!(html.contains(LIST_ERROR));

        let text = render_results_text(&ResultsView::from_records(&[record()]));
        assert!(text.starts_with("[203910123] Koç <Üniversitesi>"));
        assert!(text.contains("Kontenjan: 80"));
        assert!(text.contains("Puan: 512.25"));
    }
}
