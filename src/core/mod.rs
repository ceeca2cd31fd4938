pub mod cascade;
pub mod controller;
pub mod controls;
pub mod location;
pub mod tokens;

pub use crate::domain::model::{DataSourceStatus, FilterOptions, ProgramRecord};
pub use crate::domain::ports::{ConfigProvider, DirectoryApi, ListQuery};
pub use crate::utils::error::Result;
