use crate::core::controls::{FormControls, SortControls};
use crate::domain::state::{Category, SortOrder, SortState};
use crate::utils::error::Result;
use askama::Template;

struct OptionItem<'a> {
    value: &'a str,
    selected: bool,
}

struct SelectItem<'a> {
    param: &'static str,
    label: &'static str,
    all_selected: bool,
    options: Vec<OptionItem<'a>>,
}

#[derive(Template)]
#[template(
    source = r#"<input type="text" class="form-control" id="searchInput" name="search" value="{{ search }}">
{%- for select in selects -%}
<select class="form-select" id="{{ select.param }}Filter" name="{{ select.param }}"><option value=""{% if select.all_selected %} selected{% endif %}>Tüm {{ select.label }}</option>
{%- for option in select.options -%}
<option value="{{ option.value }}"{% if option.selected %} selected{% endif %}>{{ option.value }}</option>
{%- endfor -%}
</select>
{%- endfor %}"#,
    ext = "html"
)]
struct FiltersTemplate<'a> {
    search: &'a str,
    selects: Vec<SelectItem<'a>>,
}

pub fn render_filters_html(controls: &FormControls) -> Result<String> {
    let selects = Category::ALL
        .into_iter()
        .map(|category| {
            let select = controls.select(category);
            SelectItem {
                param: category.param(),
                label: category.label(),
                all_selected: select.value.is_empty(),
                options: select
                    .options
                    .iter()
                    .map(|option| OptionItem {
                        value: option,
                        selected: *option == select.value,
                    })
                    .collect(),
            }
        })
        .collect();

    let template = FiltersTemplate {
        search: &controls.search_input,
        selects,
    };
    Ok(template.render()?)
}

struct SortButton {
    key: &'static str,
    label: &'static str,
    default_order: &'static str,
    active: bool,
    arrow: &'static str,
}

#[derive(Template)]
#[template(
    source = r#"{% for button in buttons -%}
<button type="button" class="btn btn-outline-primary sort-btn{% if button.active %} active{% endif %}" data-sort="{{ button.key }}" data-order="{{ button.default_order }}">{{ button.label }}{{ button.arrow }}</button>
{%- endfor %}"#,
    ext = "html"
)]
struct SortTemplate {
    buttons: Vec<SortButton>,
}

/// 排序按鈕；作用中的按鈕顯示目前方向
pub fn render_sort_html(controls: &SortControls, current: SortState) -> Result<String> {
    let buttons = controls
        .iter()
        .map(|control| {
            let arrow = match (control.active, current.key == control.key, current.order) {
                (false, _, _) => "",
                (true, true, SortOrder::Desc) => " ↓",
                (true, _, _) => " ↑",
            };
            SortButton {
                key: control.key.as_str(),
                label: control.key.label(),
                default_order: control.default_order.as_str(),
                active: control.active,
                arrow,
            }
        })
        .collect();

    Ok(SortTemplate { buttons }.render()?)
}

pub fn render_filters_text(controls: &FormControls) -> String {
    Category::ALL
        .into_iter()
        .map(|category| {
            let select = controls.select(category);
            let value = if select.value.is_empty() {
                "(tümü)"
            } else {
                select.value.as_str()
            };
            format!(
                "{} [{}]: {}",
                category.label(),
                value,
                select.options.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
