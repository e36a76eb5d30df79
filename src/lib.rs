pub mod database;
pub mod domain;
pub mod downloader;
pub mod parser;
pub mod service;
pub mod store;
pub mod util;

// Error type for glue code that mixes error sources. The parser modules
// keep their concrete error types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
