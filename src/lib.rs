pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::HttpDirectoryApi;
pub use core::controller::{ControllerSettings, FilterController};
pub use domain::state::{Category, FilterState, SortKey, SortOrder, SortState};
pub use utils::error::{DirectoryError, Result};
