pub mod cache;
pub mod popularity;

pub use cache::InMemoryCache;
pub use popularity::InMemoryPopularityStore;
