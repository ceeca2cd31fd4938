use crate::domain::model::FilterOptions;
use crate::utils::error::{DirectoryError, Result};
use url::form_urlencoded;
use url::Url;

pub const SEARCH_PARAM: &str = "search";
pub const SORT_BY_PARAM: &str = "sort_by";
pub const SORT_ORDER_PARAM: &str = "sort_order";
pub const RETURN_PARAM: &str = "return";

/// 四個類別篩選器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ulke,
    Sehir,
    Grup,
    Tur,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Ulke,
        Category::Sehir,
        Category::Grup,
        Category::Tur,
    ];

    pub fn param(self) -> &'static str {
        match self {
            Category::Ulke => "ulke",
            Category::Sehir => "sehir",
            Category::Grup => "grup",
            Category::Tur => "tur",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Ulke => "Ülke",
            Category::Sehir => "Şehir",
            Category::Grup => "Grup",
            Category::Tur => "Tür",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.param() == param)
    }

    pub fn options(self, options: &FilterOptions) -> &[String] {
        match self {
            Category::Ulke => &options.ulkeler,
            Category::Sehir => &options.sehirler,
            Category::Grup => &options.gruplar,
            Category::Tur => &options.turler,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    UniversityName,
    Quota,
    Score,
    Ranking,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::UniversityName,
        SortKey::Quota,
        SortKey::Score,
        SortKey::Ranking,
    ];

    /// 送給 API 的欄位名稱
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::UniversityName => "Üniversite Adı",
            SortKey::Quota => "Kontenjan",
            SortKey::Score => "2024 YKS En Küçük Puanı",
            SortKey::Ranking => "2024 Başarı Sırası",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::UniversityName => "Üniversite Adı",
            SortKey::Quota => "Kontenjan",
            SortKey::Score => "Puan",
            SortKey::Ranking => "Başarı Sırası",
        }
    }

    /// 排序按鈕第一次被選取時使用的方向
    pub fn default_order(self) -> SortOrder {
        match self {
            SortKey::UniversityName | SortKey::Ranking => SortOrder::Asc,
            SortKey::Quota | SortKey::Score => SortOrder::Desc,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// 四個類別篩選值，空字串代表未選取
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub ulke: String,
    pub sehir: String,
    pub grup: String,
    pub tur: String,
}

impl FilterSelection {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Ulke => &self.ulke,
            Category::Sehir => &self.sehir,
            Category::Grup => &self.grup,
            Category::Tur => &self.tur,
        }
    }

    pub fn set(&mut self, category: Category, value: impl Into<String>) {
        let slot = match category {
            Category::Ulke => &mut self.ulke,
            Category::Sehir => &mut self.sehir,
            Category::Grup => &mut self.grup,
            Category::Tur => &mut self.tur,
        };
        *slot = value.into();
    }

    /// 依固定順序列出已選取的類別
    pub fn selected(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|(_, v)| !v.is_empty())
    }
}

/// 列表頁網址只寫入非空的篩選值；排序為預設值（校名升冪）時省略排序參數。
/// 任何合法狀態經 `listing_url` 再經 `from_url` 都會得到相同的狀態。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub filters: FilterSelection,
    pub sort: SortState,
}

impl FilterState {
    /// 從查詢字串（不含 `?`）解析。重複的參數取第一個；未知的排序值回到預設。
    pub fn from_query(query: &str) -> Self {
        let mut state = FilterState::default();
        let mut seen: Vec<String> = Vec::new();
        let mut sort_by = None;
        let mut sort_order = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if seen.iter().any(|k| *k == key) {
                continue;
            }
            seen.push(key.to_string());

            match key.as_ref() {
                SEARCH_PARAM => state.search = value.into_owned(),
                SORT_BY_PARAM => sort_by = SortKey::parse(&value),
                SORT_ORDER_PARAM => sort_order = SortOrder::parse(&value),
                other => {
                    if let Some(category) = Category::from_param(other) {
                        state.filters.set(category, value.into_owned());
                    }
                }
            }
        }

        state.sort = SortState::new(sort_by.unwrap_or_default(), sort_order.unwrap_or_default());
        state
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// 列表頁網址上要出現的參數
    pub fn url_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push((SEARCH_PARAM, self.search.clone()));
        }
        for (category, value) in self.filters.selected() {
            pairs.push((category.param(), value.to_string()));
        }
        if self.sort != SortState::default() {
            pairs.push((SORT_BY_PARAM, self.sort.key.as_str().to_string()));
            pairs.push((SORT_ORDER_PARAM, self.sort.order.as_str().to_string()));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.url_pairs())
            .finish()
    }

    /// 以 `page` 為基底組出列表頁網址；預設狀態時不帶查詢字串
    pub fn listing_url(&self, page: &Url) -> Url {
        let mut url = page.clone();
        url.set_fragment(None);
        url.set_query(None);

        let pairs = self.url_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }
}

/// 詳細頁網址：`{detail_path}/{code}?return=<列表頁網址>`
pub fn detail_url(page: &Url, detail_path: &str, code: &str, return_to: &Url) -> Result<Url> {
    let mut url = page.join(detail_path)?;
    url.set_fragment(None);
    url.set_query(None);

    url.path_segments_mut()
        .map_err(|_| DirectoryError::InvalidUrlError {
            url: page.to_string(),
            reason: "URL cannot be used as a base for detail links".to_string(),
        })?
        .pop_if_empty()
        .push(code);

    url.query_pairs_mut()
        .append_pair(RETURN_PARAM, return_to.as_str());
    Ok(url)
}

/// 從詳細頁網址取回 `return` 參數
pub fn return_target(detail: &Url) -> Option<Url> {
    detail
        .query_pairs()
        .find(|(k, _)| k == RETURN_PARAM)
        .and_then(|(_, v)| Url::parse(&v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://localhost:10000/").unwrap()
    }

    fn sample_state() -> FilterState {
        FilterState {
            search: "bilgisayar mühendisliği".to_string(),
            filters: FilterSelection {
                ulke: "Türkiye".to_string(),
                sehir: "İstanbul".to_string(),
                grup: "Sayısal".to_string(),
                tur: "Devlet".to_string(),
            },
            sort: SortState::new(SortKey::Score, SortOrder::Desc),
        }
    }

    #[test]
    fn test_round_trip_full_state() {
        let state = sample_state();
        let url = state.listing_url(&page());
        assert_eq!(FilterState::from_url(&url), state);
    }

    #[test]
    fn test_round_trip_every_sort_and_subset() {
        let values = ["Türkiye", "İstanbul", "Eşit Ağırlık", "Vakıf & Özel"];

        for key in SortKey::ALL {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                for mask in 0u8..32 {
                    let mut state = FilterState {
                        sort: SortState::new(key, order),
                        ..FilterState::default()
                    };
                    if mask & 1 != 0 {
                        state.search = "a+b=c ?".to_string();
                    }
                    for (i, category) in Category::ALL.into_iter().enumerate() {
                        if mask & (1 << (i + 1)) != 0 {
                            state.filters.set(category, values[i]);
                        }
                    }

                    let url = state.listing_url(&page());
                    assert_eq!(FilterState::from_url(&url), state, "url: {}", url);
                }
            }
        }
    }

    #[test]
    fn test_default_state_has_bare_url() {
        let url = FilterState::default().listing_url(&page());
        assert_eq!(url.as_str(), "http://localhost:10000/");
        assert!(FilterState::from_url(&url).is_default());
    }

    #[test]
    fn test_unknown_sort_values_fall_back_to_default() {
        let state = FilterState::from_query("sort_by=Rastgele&sort_order=sideways&grup=TM-2");
        assert_eq!(state.sort, SortState::default());
        assert_eq!(state.filters.grup, "TM-2");
    }

    #[test]
    fn test_first_duplicate_param_wins() {
        let state = FilterState::from_query("sehir=Ankara&sehir=%C4%B0zmir");
        assert_eq!(state.filters.sehir, "Ankara");
    }

    #[test]
    fn test_listing_url_replaces_existing_query() {
        let page = Url::parse("http://localhost:10000/?eski=1#liste").unwrap();
        let mut state = FilterState::default();
        state.filters.sehir = "Ankara".to_string();

        assert_eq!(
            state.listing_url(&page).as_str(),
            "http://localhost:10000/?sehir=Ankara"
        );
    }

    #[test]
    fn test_detail_url_encodes_listing_state() {
        let state = sample_state();
        let listing = state.listing_url(&page());

        let detail = detail_url(&page(), "/detay", "101110001", &listing).unwrap();

        assert_eq!(detail.path(), "/detay/101110001");
        let back = return_target(&detail).unwrap();
        assert_eq!(back, listing);
        assert_eq!(FilterState::from_url(&back), state);
    }

    #[test]
    fn test_detail_url_escapes_code_segment() {
        let listing = page();
        let detail = detail_url(&page(), "/detay/", "A/B 1", &listing).unwrap();
        assert_eq!(detail.path(), "/detay/A%2FB%201");
    }

    #[test]
    fn test_sort_key_defaults() {
        assert_eq!(SortKey::UniversityName.default_order(), SortOrder::Asc);
        assert_eq!(SortKey::Quota.default_order(), SortOrder::Desc);
        assert_eq!(SortKey::parse("Kontenjan"), Some(SortKey::Quota));
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    }
}
