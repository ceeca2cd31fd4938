use crate::domain::model::{display_cell, display_text, ProgramRecord};
use crate::utils::error::Result;
use askama::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

fn row(label: &'static str, value: String) -> DetailRow {
    DetailRow { label, value }
}

/// 詳細資料對話框
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub program_code: String,
    pub details_href: String,
    pub link: Option<String>,
    pub left: Vec<DetailRow>,
    pub right: Vec<DetailRow>,
}

impl DetailView {
    pub fn from_record(record: &ProgramRecord, details_href: String) -> Self {
        let left = vec![
            row("Program Kodu", display_text(record.program_code.as_deref())),
            row("Fakülte Adı", display_text(record.faculty.as_deref())),
            row("Ülke", record.country_or_default().to_string()),
            row("Şehir", display_text(record.city.as_deref())),
            row("Grup", display_text(record.group.as_deref())),
            row("Program Adı", display_text(record.program.as_deref())),
            row("Tür", display_text(record.program_type.as_deref())),
        ];
        let right = vec![
            row("Kontenjan", display_cell(record.quota.as_ref())),
            row("2024 Başarı Sırası", display_cell(record.ranking.as_ref())),
            row("Başarı Sırası Aralığı", display_cell(record.ranking_range.as_ref())),
            row("2024 YKS En Küçük Puanı", display_cell(record.score.as_ref())),
        ];

        Self {
            title: display_text(record.university.as_deref()),
            program_code: record.code().to_string(),
            details_href,
            link: record.link.clone().filter(|l| !l.trim().is_empty()),
            left,
            right,
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.left
            .iter()
            .chain(self.right.iter())
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

#[derive(Template)]
#[template(
    source = r#"<div class="modal-header">
    <h5 class="modal-title" id="modalTitle"><i class="fas fa-university me-2"></i>{{ view.title }}</h5>
</div>
<div class="modal-body" id="modalBody">
    <div class="row">
        <div class="col-md-6">
            {%- for item in view.left %}
            <div class="detail-item">
                <span class="detail-label">{{ item.label }}:</span>
                <span class="detail-value">{{ item.value }}</span>
            </div>
            {%- endfor %}
        </div>
        <div class="col-md-6">
            {%- for item in view.right %}
            <div class="detail-item">
                <span class="detail-label">{{ item.label }}:</span>
                <span class="detail-value">{{ item.value }}</span>
            </div>
            {%- endfor %}
        </div>
    </div>
</div>
<div class="modal-footer">
    {% match view.link %}{% when Some with (link) %}<a class="btn btn-outline-secondary" href="{{ link }}" target="_blank" rel="noopener">Bağlantı</a>{% when None %}{% endmatch %}
    <a class="btn btn-primary" id="detaylarBtn" href="{{ view.details_href }}">Detaylar</a>
</div>"#,
    ext = "html"
)]
struct DetailTemplate<'a> {
    view: &'a DetailView,
}

pub fn render_detail_html(view: &DetailView) -> Result<String> {
    Ok(DetailTemplate { view }.render()?)
}

pub fn render_detail_text(view: &DetailView) -> String {
    let mut lines = vec![view.title.clone()];
    for item in view.left.iter().chain(view.right.iter()) {
        lines.push(format!("  {}: {}", item.label, item.value));
    }
    if let Some(link) = &view.link {
        lines.push(format!("  Bağlantı: {}", link));
    }
    lines.push(format!("  Detaylar: {}", view.details_href));
    lines.join("\n")
}
