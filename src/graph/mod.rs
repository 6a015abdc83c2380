mod crawl;
mod store;

pub use crawl::{BoundedCrawler, CrawlConfig, CrawlOutcome, CrawlReport, FetchFailure};
pub use store::{Edge, GraphStore};
