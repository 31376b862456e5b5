pub mod cache;
pub mod client;
pub mod html;
pub mod listing;

pub use cache::{clear_cache, get_cache_path, CacheConfig, PageCache};
pub use client::create_client;
pub use listing::{parse_listing, scrape_source};
