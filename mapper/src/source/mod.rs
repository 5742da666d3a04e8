pub mod file;
pub mod http;
pub mod synthetic;

pub use file::FileFeedSource;
pub use http::HttpFeedSource;
pub use synthetic::{GeneratorConfig, SyntheticFeedSource};
