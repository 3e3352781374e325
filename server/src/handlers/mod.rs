pub mod dictionary;
pub mod pages;
pub mod products;
pub mod projects;

pub use dictionary::get_dictionary_bundle;
pub use pages::{HealthResponse, health, not_found, serve_app_shell};
pub use products::{featured_products, get_product, list_products, similar_products};
pub use projects::{get_project, list_projects};
