use crate::domain::model::{display_text, ProgramRecord};
use crate::utils::error::Result;
use askama::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// `校名 - 學程名`
    pub label: String,
    pub university: String,
    pub program_code: String,
}

impl From<&ProgramRecord> for Suggestion {
    fn from(record: &ProgramRecord) -> Self {
        Self {
            label: format!(
                "{} - {}",
                record.university_name(),
                display_text(record.program.as_deref())
            ),
            university: record.university_name().to_string(),
            program_code: record.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutocompleteView {
    pub items: Vec<Suggestion>,
    pub visible: bool,
}

impl AutocompleteView {
    pub fn hidden() -> Self {
        Self::default()
    }

    /// 取前 `limit` 筆；沒有結果時隱藏
    pub fn from_records(records: &[ProgramRecord], limit: usize) -> Self {
        let items: Vec<Suggestion> = records.iter().take(limit).map(Suggestion::from).collect();
        let visible = !items.is_empty();
        Self { items, visible }
    }
}

#[derive(Template)]
#[template(
    source = r#"<div id="autocomplete-list" class="autocomplete-items list-group position-absolute w-100" style="display:{% if view.visible %}block{% else %}none{% endif %}">
{%- for item in view.items -%}
<button type="button" class="list-group-item list-group-item-action" data-index="{{ loop.index0 }}" data-program-kodu="{{ item.program_code }}">{{ item.label }}</button>
{%- endfor -%}
</div>"#,
    ext = "html"
)]
struct AutocompleteTemplate<'a> {
    view: &'a AutocompleteView,
}

pub fn render_autocomplete_html(view: &AutocompleteView) -> Result<String> {
    Ok(AutocompleteTemplate { view }.render()?)
}
