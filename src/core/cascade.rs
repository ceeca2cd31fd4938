use crate::core::controls::FormControls;
use crate::domain::model::FilterOptions;
use crate::domain::state::{Category, FilterSelection};

/// 套用完整選項清單（`/api/filtreler`），再把狀態中的值選回去。
/// 回傳值不在清單中、因此維持未選取的類別。
pub fn apply_full_options(
    controls: &mut FormControls,
    options: &FilterOptions,
    selection: &FilterSelection,
) -> Vec<Category> {
    let mut unmatched = Vec::new();
    for category in Category::ALL {
        let select = controls.select_mut(category);
        select.select(selection.get(category));
        if select.replace_options(category.options(options).to_vec()) {
            unmatched.push(category);
        }
    }
    unmatched
}

/// 套用 `/api/dinamik-filtreler` 的結果。`changed` 自己的選項不動，
/// 其他類別的值若不在新清單中就改回未選取。回傳被重設的類別。
pub fn apply_dependent_options(
    controls: &mut FormControls,
    changed: Category,
    options: &FilterOptions,
) -> Vec<Category> {
    let mut reset = Vec::new();
    for category in Category::ALL {
        if category == changed {
            continue;
        }
        let select = controls.select_mut(category);
        if select.replace_options(category.options(options).to_vec()) {
            reset.push(category);
        }
    }
    reset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn full_options() -> FilterOptions {
        FilterOptions {
            ulkeler: strings(&["Türkiye", "KKTC"]),
            sehirler: strings(&["Ankara", "İstanbul", "İzmir"]),
            gruplar: strings(&["Sayısal", "Sözel", "Eşit Ağırlık"]),
            turler: strings(&["Devlet", "Vakıf"]),
        }
    }

    #[test]
    fn test_changed_filter_keeps_its_options() {
        let mut controls = FormControls::default();
        apply_full_options(&mut controls, &full_options(), &FilterSelection::default());
        controls.grup.select("Sayısal");

        let recomputed = FilterOptions {
            ulkeler: strings(&["Türkiye"]),
            sehirler: strings(&["İstanbul"]),
            gruplar: strings(&["Sayısal"]),
            turler: strings(&["Devlet"]),
        };
        let reset = apply_dependent_options(&mut controls, Category::Grup, &recomputed);

        assert!(reset.is_empty());
        assert_eq!(controls.grup.options, full_options().gruplar);
        assert_eq!(controls.sehir.options, strings(&["İstanbul"]));
        assert_eq!(controls.tur.options, strings(&["Devlet"]));
    }

    #[test]
    fn test_vanished_selection_resets_to_unselected() {
        let mut controls = FormControls::default();
        apply_full_options(&mut controls, &full_options(), &FilterSelection::default());
        controls.sehir.select("İzmir");
        controls.tur.select("Vakıf");
        controls.grup.select("Sözel");

        let recomputed = FilterOptions {
            ulkeler: strings(&["Türkiye"]),
            sehirler: strings(&["Ankara", "İstanbul"]),
            gruplar: strings(&["Sözel"]),
            turler: strings(&["Devlet", "Vakıf"]),
        };
        let reset = apply_dependent_options(&mut controls, Category::Grup, &recomputed);

        assert_eq!(reset, vec![Category::Sehir]);
        assert_eq!(controls.sehir.value, "");
        assert_eq!(controls.tur.value, "Vakıf");
        assert_eq!(controls.grup.value, "Sözel");
    }

    #[test]
    fn test_full_options_reapply_state_values() {
        let mut controls = FormControls::default();
        let selection = FilterSelection {
            sehir: "Ankara".to_string(),
            grup: "Yok Böyle Grup".to_string(),
            ..FilterSelection::default()
        };

        let unmatched = apply_full_options(&mut controls, &full_options(), &selection);

        assert_eq!(unmatched, vec![Category::Grup]);
        assert_eq!(controls.sehir.value, "Ankara");
        assert_eq!(controls.grup.value, "");
        assert_eq!(controls.ulke.options, full_options().ulkeler);
    }
}
