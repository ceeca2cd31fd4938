pub mod http;

pub use http::HttpDirectoryApi;
