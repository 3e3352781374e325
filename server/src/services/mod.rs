pub mod content;
pub mod content_cache;
pub mod dictionary;
pub mod notion_client;

pub use content::ContentStore;
pub use content_cache::CachedContentStore;
pub use dictionary::{bundled_locales, get_dictionary};
pub use notion_client::NotionClient;
