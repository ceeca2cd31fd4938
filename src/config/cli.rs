use crate::core::controller::{DEFAULT_DETAIL_PATH, DEFAULT_SUGGESTION_LIMIT};
use crate::core::ConfigProvider;
use crate::domain::state::{Category, SortKey};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path_prefix, validate_positive_number, validate_timeout, validate_url, Validate,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "universite-rehberi")]
#[command(about = "Search client for the university program directory")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:10000/")]
    pub api_base_url: String,

    /// Listing page URL; defaults to the API base URL
    #[arg(long)]
    pub page_url: Option<String>,

    #[arg(long, default_value = DEFAULT_DETAIL_PATH)]
    pub detail_path: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub suggestion_limit: usize,

    /// Path to a TOML config file; replaces the connection flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Print rendered HTML instead of plain text")]
    pub html: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load the listing for a URL state, optionally changing filters or sort
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        /// Click a sort control (toggles when it is already active)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Show autocomplete suggestions for partial text
    Suggest {
        text: String,

        #[arg(long)]
        url: Option<String>,

        /// Pick the n-th suggestion and print its detail URL
        #[arg(long)]
        select: Option<usize>,
    },
    /// Show one program by its code
    Detail { code: String },
    /// Show filter options; with --changed, the dependent options
    Filters {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_enum)]
        changed: Option<CategoryArg>,
    },
    /// Show the data source status badge
    Status,
    /// Reset every filter and the sort order
    Clear,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Listing URL or query string to start from, e.g. "?sehir=Ankara"
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub ulke: Option<String>,

    #[arg(long)]
    pub sehir: Option<String>,

    #[arg(long)]
    pub grup: Option<String>,

    #[arg(long)]
    pub tur: Option<String>,
}

impl FilterArgs {
    pub fn category_overrides(&self) -> Vec<(Category, &str)> {
        [
            (Category::Ulke, &self.ulke),
            (Category::Sehir, &self.sehir),
            (Category::Grup, &self.grup),
            (Category::Tur, &self.tur),
        ]
        .into_iter()
        .filter_map(|(category, value)| value.as_deref().map(|v| (category, v)))
        .collect()
    }

    pub fn has_overrides(&self) -> bool {
        self.search.is_some() || !self.category_overrides().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Quota,
    Score,
    Ranking,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::UniversityName,
            SortArg::Quota => SortKey::Quota,
            SortArg::Score => SortKey::Score,
            SortArg::Ranking => SortKey::Ranking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Ulke,
    Sehir,
    Grup,
    Tur,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Ulke => Category::Ulke,
            CategoryArg::Sehir => Category::Sehir,
            CategoryArg::Grup => Category::Grup,
            CategoryArg::Tur => Category::Tur,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn page_url(&self) -> &str {
        self.page_url.as_deref().unwrap_or(&self.api_base_url)
    }

    fn detail_path(&self) -> &str {
        &self.detail_path
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout
    }

    fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_url("page_url", self.page_url())?;
        validate_path_prefix("detail_path", &self.detail_path)?;
        validate_positive_number("suggestion_limit", self.suggestion_limit, 1)?;
        validate_timeout("timeout", self.timeout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_with_overrides() {
        let config = CliConfig::try_parse_from([
            "universite-rehberi",
            "--api-base-url",
            "http://127.0.0.1:8080",
            "search",
            "--url",
            "?sehir=Ankara",
            "--grup",
            "Sayısal",
            "--sort",
            "quota",
        ])
        .unwrap();

        assert_eq!(config.page_url(), "http://127.0.0.1:8080");
        assert_eq!(config.suggestion_limit(), 10);
        assert!(config.validate().is_ok());

        match config.command {
            Command::Search { filters, sort } => {
                assert_eq!(filters.url.as_deref(), Some("?sehir=Ankara"));
                assert_eq!(filters.category_overrides(), vec![(Category::Grup, "Sayısal")]);
                assert!(filters.has_overrides());
                assert_eq!(sort.map(SortKey::from), Some(SortKey::Quota));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = CliConfig::try_parse_from([
            "universite-rehberi",
            "--suggestion-limit",
            "0",
            "status",
        ])
        .unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from([
            "universite-rehberi",
            "--detail-path",
            "detay",
            "clear",
        ])
        .unwrap();
        assert!(config.validate().is_err());

        let config =
            CliConfig::try_parse_from(["universite-rehberi", "--timeout", "0", "status"]).unwrap();
        assert!(config.validate().is_err());
    }
}
