use crate::app::views::listing::{DETAIL_ERROR, FILTERS_ERROR, LIST_ERROR};
use crate::app::views::{AutocompleteView, DetailView, ResultsView, StatusBadge};
use crate::core::cascade::{apply_dependent_options, apply_full_options};
use crate::core::controls::{FormControls, SortControls};
use crate::core::location::Location;
use crate::core::tokens::{RequestToken, RequestTokens};
use crate::domain::model::ProgramRecord;
use crate::domain::ports::{dependent_filter_request_path, ConfigProvider, DirectoryApi, ListQuery};
use crate::domain::state::{detail_url, Category, FilterState, SortKey, SortState};
use crate::utils::error::Result;
use url::Url;

pub const DEFAULT_DETAIL_PATH: &str = "/detay";
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub page_url: Url,
    pub detail_path: String,
    pub suggestion_limit: usize,
}

impl ControllerSettings {
    pub fn new(page_url: Url) -> Self {
        Self {
            page_url,
            detail_path: DEFAULT_DETAIL_PATH.to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self {
            page_url: Url::parse(config.page_url())?,
            detail_path: config.detail_path().to_string(),
            suggestion_limit: config.suggestion_limit(),
        })
    }
}

/// 一次自動完成請求；完成時憑 token 判斷是否仍是最新的
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub token: RequestToken,
    pub query: ListQuery,
}

/// 讓表單控制項、狀態、網址與結果列表保持一致。
/// API 失敗一律在呼叫處攔下並轉成固定訊息。
pub struct FilterController<A: DirectoryApi> {
    api: A,
    settings: ControllerSettings,
    state: FilterState,
    controls: FormControls,
    sort_controls: SortControls,
    location: Location,
    results: ResultsView,
    autocomplete: AutocompleteView,
    detail: Option<DetailView>,
    status: Option<StatusBadge>,
    tokens: RequestTokens,
}

impl<A: DirectoryApi> FilterController<A> {
    /// 以列表頁網址初始化
    pub fn new(api: A, settings: ControllerSettings, listing_url: Url) -> Self {
        let state = FilterState::from_url(&listing_url);
        let mut controller = Self {
            api,
            controls: FormControls::from_state(&state),
            sort_controls: SortControls::new(state.sort.key),
            location: Location::new(listing_url.clone()),
            settings,
            state,
            results: ResultsView::Idle,
            autocomplete: AutocompleteView::hidden(),
            detail: None,
            status: None,
            tokens: RequestTokens::new(),
        };
        controller.initialize(listing_url);
        controller
    }

    /// 從網址重新讀取狀態，並同步到控制項與排序按鈕
    pub fn initialize(&mut self, listing_url: Url) {
        self.state = FilterState::from_url(&listing_url);
        self.controls.load_state(&self.state);
        self.sort_controls.activate(self.state.sort.key);
        self.location.replace_state(listing_url);
        tracing::debug!("Initialized filter state: {:?}", self.state);
    }

    /// 頁面載入時的流程：狀態標籤、篩選選項、結果列表。
    /// 篩選選項載入失敗時保留錯誤訊息，不再載入列表。
    pub async fn start(&mut self) {
        self.check_status().await;
        if self.load_filters().await.is_ok() {
            self.load_results().await;
        }
    }

    /// 載入完整選項清單。網址帶來但清單中沒有的值會從狀態與網址中移除。
    pub async fn load_filters(&mut self) -> Result<()> {
        match self.api.filter_options().await {
            Ok(options) => {
                let unmatched = apply_full_options(&mut self.controls, &options, &self.state.filters);
                if !unmatched.is_empty() {
                    tracing::info!("🔄 Selections not present in option lists, cleared: {:?}", unmatched);
                    for category in &unmatched {
                        self.state.filters.set(*category, "");
                    }
                    let url = self.listing_url();
                    self.location.replace_state(url);
                }
                tracing::info!(
                    "📋 Loaded filter options ({} countries, {} cities, {} groups, {} types)",
                    options.ulkeler.len(),
                    options.sehirler.len(),
                    options.gruplar.len(),
                    options.turler.len()
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to load filter options: {}", e);
                self.results = ResultsView::error(FILTERS_ERROR);
                Err(e)
            }
        }
    }

    /// 依目前選取重新計算其他類別的選項；`changed` 的選項保持不變。
    /// 回傳因值消失而被重設的類別。
    pub async fn load_dependent_filters(&mut self, changed: Category) -> Result<Vec<Category>> {
        let selection = self.controls.selection();
        tracing::debug!(
            "Loading dependent filters: {}",
            dependent_filter_request_path(&selection)
        );

        match self.api.dependent_filter_options(&selection).await {
            Ok(options) => {
                let reset = apply_dependent_options(&mut self.controls, changed, &options);
                for category in &reset {
                    tracing::info!("🔄 {} selection no longer available, cleared", category.label());
                }
                Ok(reset)
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to load dependent filter options: {}", e);
                self.results = ResultsView::error(FILTERS_ERROR);
                Err(e)
            }
        }
    }

    /// 下拉選單變更：更新連動選項後重新搜尋。
    /// 連動選項載入失敗時只同步狀態與網址，錯誤訊息留在結果區。
    pub async fn change_filter(&mut self, category: Category, value: &str) {
        self.controls.select_mut(category).select(value);
        match self.load_dependent_filters(category).await {
            Ok(_) => self.submit_search().await,
            Err(_) => self.sync_state(),
        }
    }

    pub fn set_search_input(&mut self, text: &str) {
        self.controls.search_input = text.to_string();
    }

    /// 只改控制項的值，不觸發連動與搜尋
    pub fn set_filter_input(&mut self, category: Category, value: &str) {
        self.controls.select_mut(category).select(value);
    }

    /// 把控制項快照寫入狀態、取代網址，再載入結果
    pub async fn submit_search(&mut self) {
        self.sync_state();
        self.load_results().await;
    }

    fn sync_state(&mut self) {
        let (search, filters) = self.controls.snapshot();
        self.state.search = search;
        self.state.filters = filters;

        let url = self.listing_url();
        tracing::debug!("Replacing listing URL: {}", url);
        self.location.replace_state(url);
    }

    /// 以目前狀態載入結果，不讀控制項
    pub async fn load_results(&mut self) {
        self.results = ResultsView::Loading;
        let query = ListQuery::for_state(&self.state);
        tracing::info!("🔎 Loading programs: {}", query.request_path());

        self.results = match self.api.list_programs(&query).await {
            Ok(records) => {
                tracing::info!("✅ Received {} programs", records.len());
                ResultsView::from_records(&records)
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to load programs: {}", e);
                ResultsView::error(LIST_ERROR)
            }
        };
    }

    /// 點排序按鈕：同一個鍵就反轉方向，否則採用該按鈕的預設方向
    pub async fn sort(&mut self, key: SortKey) {
        self.state.sort = next_sort(self.state.sort, key, &self.sort_controls);
        self.sort_controls.activate(key);
        self.submit_search().await;
    }

    /// 搜尋框輸入。空字串直接隱藏清單且不發請求。
    pub fn begin_autocomplete(&mut self, text: &str) -> Option<SuggestionRequest> {
        self.controls.search_input = text.to_string();
        // 讓仍在路上的舊請求全部失效
        let token = self.tokens.issue();

        let value = text.trim();
        if value.is_empty() {
            self.autocomplete = AutocompleteView::hidden();
            return None;
        }

        Some(SuggestionRequest {
            token,
            query: ListQuery::for_suggestions(value),
        })
    }

    /// 套用自動完成回應。token 不是最新的就丟棄並回傳 false。
    pub fn finish_autocomplete(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ProgramRecord>>,
    ) -> bool {
        if !self.tokens.is_latest(token) {
            tracing::debug!("Discarding stale suggestions for token {}", token.value());
            return false;
        }

        self.autocomplete = match result {
            Ok(records) => AutocompleteView::from_records(&records, self.settings.suggestion_limit),
            Err(e) => {
                tracing::warn!("⚠️ Suggestion request failed: {}", e);
                AutocompleteView::hidden()
            }
        };
        true
    }

    pub async fn autocomplete(&mut self, text: &str) {
        if let Some(request) = self.begin_autocomplete(text) {
            let result = self.api.list_programs(&request.query).await;
            self.finish_autocomplete(request.token, result);
        }
    }

    pub fn dismiss_autocomplete(&mut self) {
        self.autocomplete = AutocompleteView::hidden();
    }

    /// 選取建議項目：導向詳細頁並帶上目前列表狀態作為 `return`
    pub fn select_suggestion(&mut self, index: usize) -> Result<Option<Url>> {
        let Some(item) = self.autocomplete.items.get(index).cloned() else {
            return Ok(None);
        };

        let url = self.detail_url_for(&item.program_code)?;
        self.controls.search_input = item.university;
        self.autocomplete = AutocompleteView::hidden();

        tracing::info!("➡️ Navigating to {}", url);
        self.location.push_state(url.clone());
        Ok(Some(url))
    }

    /// 清除所有篩選與排序，網址回到列表頁本身，重新載入
    pub async fn clear_filters(&mut self) {
        self.controls.reset_values();
        self.state = FilterState::default();
        self.sort_controls.activate(SortKey::default());

        let url = self.listing_url();
        self.location.replace_state(url);

        tracing::info!("🧹 Filters cleared");
        if self.load_filters().await.is_ok() {
            self.load_results().await;
        }
    }

    pub async fn show_detail(&mut self, code: &str) {
        let result = match self.api.program(code).await {
            Ok(record) => self
                .detail_url_for(record.code())
                .map(|url| DetailView::from_record(&record, url.to_string())),
            Err(e) => Err(e),
        };

        match result {
            Ok(view) => self.detail = Some(view),
            Err(e) => {
                tracing::warn!("⚠️ Failed to load program {}: {}", code, e);
                self.detail = None;
                self.results = ResultsView::error(DETAIL_ERROR);
            }
        }
    }

    pub async fn check_status(&mut self) {
        self.status = Some(match self.api.status().await {
            Ok(status) => StatusBadge::from_status(&status),
            Err(e) => {
                tracing::warn!("⚠️ Status check failed: {}", e);
                StatusBadge::connection_error()
            }
        });
    }

    pub fn listing_url(&self) -> Url {
        self.state.listing_url(&self.settings.page_url)
    }

    pub fn detail_url_for(&self, code: &str) -> Result<Url> {
        detail_url(
            &self.settings.page_url,
            &self.settings.detail_path,
            code,
            &self.listing_url(),
        )
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn controls(&self) -> &FormControls {
        &self.controls
    }

    pub fn sort_controls(&self) -> &SortControls {
        &self.sort_controls
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn autocomplete_view(&self) -> &AutocompleteView {
        &self.autocomplete
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn status_badge(&self) -> Option<&StatusBadge> {
        self.status.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

/// 排序切換規則
pub fn next_sort(current: SortState, key: SortKey, controls: &SortControls) -> SortState {
    if current.key == key {
        SortState::new(key, current.order.toggled())
    } else {
        let order = controls
            .get(key)
            .map(|c| c.default_order)
            .unwrap_or_else(|| key.default_order());
        SortState::new(key, order)
    }
}
