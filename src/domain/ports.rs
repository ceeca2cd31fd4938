use crate::domain::model::{DataSourceStatus, FilterOptions, ProgramRecord};
use crate::domain::state::{
    Category, FilterSelection, FilterState, SortKey, SortOrder, SEARCH_PARAM, SORT_BY_PARAM,
    SORT_ORDER_PARAM,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::form_urlencoded;

pub const PROGRAMS_PATH: &str = "api/universiteler";
pub const FILTERS_PATH: &str = "api/filtreler";
pub const DEPENDENT_FILTERS_PATH: &str = "api/dinamik-filtreler";
pub const PROGRAM_PATH: &str = "api/universite";
pub const STATUS_PATH: &str = "api/status";

/// `/api/universiteler` 的查詢參數，保留順序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pairs: Vec<(&'static str, String)>,
}

impl ListQuery {
    /// 列表查詢：七個參數全部帶上，空值也保留
    pub fn for_state(state: &FilterState) -> Self {
        let mut pairs = vec![(SEARCH_PARAM, state.search.clone())];
        for category in Category::ALL {
            pairs.push((category.param(), state.filters.get(category).to_string()));
        }
        pairs.push((SORT_BY_PARAM, state.sort.key.as_str().to_string()));
        pairs.push((SORT_ORDER_PARAM, state.sort.order.as_str().to_string()));
        Self { pairs }
    }

    /// 自動完成查詢：只帶搜尋字，依校名升冪
    pub fn for_suggestions(text: &str) -> Self {
        Self {
            pairs: vec![
                (SEARCH_PARAM, text.to_string()),
                (SORT_BY_PARAM, SortKey::UniversityName.as_str().to_string()),
                (SORT_ORDER_PARAM, SortOrder::Asc.as_str().to_string()),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }

    /// 含路徑的相對請求，例如 `/api/universiteler?search=...`
    pub fn request_path(&self) -> String {
        format!("/{}?{}", PROGRAMS_PATH, self.encode())
    }
}

/// `/api/dinamik-filtreler` 的查詢參數：只帶已選取的類別
pub fn dependent_filter_pairs(selection: &FilterSelection) -> Vec<(&'static str, String)> {
    selection
        .selected()
        .map(|(category, value)| (category.param(), value.to_string()))
        .collect()
}

pub fn dependent_filter_request_path(selection: &FilterSelection) -> String {
    let pairs = dependent_filter_pairs(selection);
    if pairs.is_empty() {
        return format!("/{}", DEPENDENT_FILTERS_PATH);
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("/{}?{}", DEPENDENT_FILTERS_PATH, query)
}

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_programs(&self, query: &ListQuery) -> Result<Vec<ProgramRecord>>;
    async fn filter_options(&self) -> Result<FilterOptions>;
    async fn dependent_filter_options(&self, selection: &FilterSelection) -> Result<FilterOptions>;
    async fn program(&self, code: &str) -> Result<ProgramRecord>;
    async fn status(&self) -> Result<DataSourceStatus>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn page_url(&self) -> &str;
    fn detail_path(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn suggestion_limit(&self) -> usize;
}
