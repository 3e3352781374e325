pub mod api_locale;
pub mod locale;
pub mod redirects;

pub use api_locale::api_locale_middleware;
pub use locale::{
    LOCALE_COOKIE, LOCALE_COOKIE_MAX_AGE, RequestLocale, Resolution, locale_router_middleware,
    resolve,
};
pub use redirects::{LEGACY_REDIRECTS, RedirectRule, legacy_redirect_middleware, match_legacy};
