pub mod error;
pub mod i18n;
pub mod images;

pub use error::{ApiError, ApiResult};
pub use i18n::{extract_locale_from_header, get_locale, set_locale};
pub use images::{ImagePreset, is_valid_slug, optimized_image_url};
