use crate::domain::state::{Category, FilterSelection, FilterState, SortKey, SortOrder};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    pub options: Vec<String>,
    pub value: String,
}

impl SelectControl {
    pub fn select(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    /// 換掉選項清單；目前的值不在新清單中時改回未選取並回傳 true
    pub fn replace_options(&mut self, options: Vec<String>) -> bool {
        self.options = options;
        if !self.value.is_empty() && !self.has_option(&self.value) {
            self.value.clear();
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormControls {
    pub search_input: String,
    pub ulke: SelectControl,
    pub sehir: SelectControl,
    pub grup: SelectControl,
    pub tur: SelectControl,
}

impl FormControls {
    pub fn from_state(state: &FilterState) -> Self {
        let mut controls = Self::default();
        controls.load_state(state);
        controls
    }

    pub fn select(&self, category: Category) -> &SelectControl {
        match category {
            Category::Ulke => &self.ulke,
            Category::Sehir => &self.sehir,
            Category::Grup => &self.grup,
            Category::Tur => &self.tur,
        }
    }

    pub fn select_mut(&mut self, category: Category) -> &mut SelectControl {
        match category {
            Category::Ulke => &mut self.ulke,
            Category::Sehir => &mut self.sehir,
            Category::Grup => &mut self.grup,
            Category::Tur => &mut self.tur,
        }
    }

    /// 把狀態寫回控制項；選項清單不變
    pub fn load_state(&mut self, state: &FilterState) {
        self.search_input = state.search.clone();
        for category in Category::ALL {
            self.select_mut(category)
                .select(state.filters.get(category));
        }
    }

    pub fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::default();
        for category in Category::ALL {
            selection.set(category, self.select(category).value.clone());
        }
        selection
    }

    /// 送出搜尋時的快照，搜尋字去除前後空白
    pub fn snapshot(&self) -> (String, FilterSelection) {
        (self.search_input.trim().to_string(), self.selection())
    }

    pub fn reset_values(&mut self) {
        self.search_input.clear();
        for category in Category::ALL {
            self.select_mut(category).clear();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortControl {
    pub key: SortKey,
    pub default_order: SortOrder,
    pub active: bool,
}

/// 排序按鈕組，任何時刻恰好一個為 active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortControls {
    controls: Vec<SortControl>,
}

impl SortControls {
    pub fn new(active: SortKey) -> Self {
        let controls = SortKey::ALL
            .into_iter()
            .map(|key| SortControl {
                key,
                default_order: key.default_order(),
                active: key == active,
            })
            .collect();
        Self { controls }
    }

    pub fn activate(&mut self, key: SortKey) {
        for control in &mut self.controls {
            control.active = control.key == key;
        }
    }

    pub fn get(&self, key: SortKey) -> Option<&SortControl> {
        self.controls.iter().find(|c| c.key == key)
    }

    pub fn active_key(&self) -> Option<SortKey> {
        self.controls.iter().find(|c| c.active).map(|c| c.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortControl> {
        self.controls.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_options_resets_missing_value() {
        let mut select = SelectControl::default();
        select.select("İzmir");

        assert!(select.replace_options(vec!["Ankara".to_string()]));
        assert_eq!(select.value, "");

        select.select("Ankara");
        assert!(!select.replace_options(vec!["Ankara".to_string(), "Bursa".to_string()]));
        assert_eq!(select.value, "Ankara");
    }

    #[test]
    fn test_snapshot_trims_search_only() {
        let mut controls = FormControls::default();
        controls.search_input = "  boğaziçi  ".to_string();
        controls.grup.select(" Sayısal ");

        let (search, selection) = controls.snapshot();
        assert_eq!(search, "boğaziçi");
        assert_eq!(selection.grup, " Sayısal ");
    }

    #[test]
    fn test_exactly_one_sort_control_active() {
        let mut controls = SortControls::new(SortKey::Quota);
        assert_eq!(controls.active_key(), Some(SortKey::Quota));

        controls.activate(SortKey::Ranking);
        assert_eq!(controls.iter().filter(|c| c.active).count(), 1);
        assert_eq!(controls.active_key(), Some(SortKey::Ranking));
        assert_eq!(
            controls.get(SortKey::Score).map(|c| c.default_order),
            Some(SortOrder::Desc)
        );
    }
}
