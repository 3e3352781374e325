//! Locale resolution and redirect middleware
//!
//! Runs on every inbound request before routing. Requests whose first path
//! segment is a supported locale pass through (the cookie is refreshed to
//! follow the URL); anything else that is not excluded gets a temporary
//! redirect into the locale-prefixed equivalent. The decision itself is a
//! pure function over the request view so it can be tested without an HTTP
//! stack; this middleware only applies the outcome.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::AppState;
use crate::locale::LocaleRegistry;
use crate::utils::set_locale;

/// Cookie memoizing the visitor's locale decision.
pub const LOCALE_COOKIE: &str = "LOCALE";

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE: u32 = 31_536_000;

/// Path prefixes the resolver never touches (matched per whole segment).
const BYPASS_PREFIXES: &[&str] = &["/api", "/api-docs", "/assets", "/docs", "/images"];

const FAVICON_PATH: &str = "/favicon.ico";

/// Locale serving the current request, inserted into request extensions on
/// pass-through so page handlers can read it.
#[derive(Debug, Clone)]
pub struct RequestLocale(pub String);

/// Terminal outcome for one request.
///
/// Cookie and redirect side effects are expressed as values; the HTTP
/// boundary in [`locale_router_middleware`] turns them into headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Excluded path: proceed untouched, no cookie interaction.
    Bypass,
    /// Valid locale prefix: proceed, overwriting the cookie when it
    /// disagrees with the URL.
    Pass { locale: String, refresh_cookie: bool },
    /// No locale prefix: temporary redirect to `location`, cookie set to
    /// `locale` unconditionally.
    Redirect { location: String, locale: String },
}

/// Decide the outcome for a request view.
///
/// Precedence on the redirect branch: valid cookie, then the first valid
/// primary subtag of `Accept-Language` (quality weights ignored), then the
/// registry default. Malformed input never errors; it falls through.
pub fn resolve(
    registry: &LocaleRegistry,
    path: &str,
    query: Option<&str>,
    cookie_locale: Option<&str>,
    accept_language: Option<&str>,
) -> Resolution {
    if is_bypassed(path) {
        return Resolution::Bypass;
    }

    if let Some(segment) = first_segment(path)
        && registry.is_valid(segment)
    {
        return Resolution::Pass {
            locale: segment.to_string(),
            refresh_cookie: cookie_locale != Some(segment),
        };
    }

    let locale = cookie_locale
        .filter(|candidate| registry.is_valid(candidate))
        .map(str::to_string)
        .or_else(|| accept_language.and_then(|header| header_locale(registry, header)))
        .unwrap_or_else(|| registry.default_locale().to_string());

    let mut location =
        if path == "/" { format!("/{locale}") } else { format!("/{locale}{path}") };
    if let Some(query) = query {
        location.push('?');
        location.push_str(query);
    }

    Resolution::Redirect { location, locale }
}

/// Apply [`resolve`] at the HTTP boundary.
pub async fn locale_router_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let cookie_locale = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, LOCALE_COOKIE))
        .map(str::to_string);
    let accept_language = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match resolve(
        &state.registry,
        &path,
        query.as_deref(),
        cookie_locale.as_deref(),
        accept_language.as_deref(),
    ) {
        Resolution::Bypass => next.run(req).await,
        Resolution::Pass { locale, refresh_cookie } => {
            tracing::debug!("Serving {} under locale '{}'", path, locale);
            set_locale(&locale);
            req.extensions_mut().insert(RequestLocale(locale.clone()));
            let mut response = next.run(req).await;
            if refresh_cookie {
                append_locale_cookie(&mut response, &locale);
            }
            response
        },
        Resolution::Redirect { location, locale } => {
            tracing::debug!("Redirecting {} to {} (locale '{}')", path, location, locale);
            let mut response = Redirect::temporary(&location).into_response();
            append_locale_cookie(&mut response, &locale);
            response
        },
    }
}

fn append_locale_cookie(response: &mut Response, locale: &str) {
    let cookie = format!(
        "{LOCALE_COOKIE}={locale}; Path=/; Max-Age={LOCALE_COOKIE_MAX_AGE}; SameSite=Lax"
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// Exclusion rules: framework/static prefixes, anything that looks like a
/// file (contains a dot), and the favicon itself.
fn is_bypassed(path: &str) -> bool {
    if path == FAVICON_PATH || path.contains('.') {
        return true;
    }
    BYPASS_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn first_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/')?;
    match rest.split('/').next() {
        Some("") | None => None,
        Some(segment) => Some(segment),
    }
}

/// First valid primary subtag of an Accept-Language header, in declaration
/// order. Quality weights are ignored; empty or unparseable entries are
/// skipped.
fn header_locale(registry: &LocaleRegistry, header: &str) -> Option<String> {
    for entry in header.split(',') {
        let tag = entry.split(';').next().unwrap_or(entry).trim();
        if tag.is_empty() {
            continue;
        }
        let primary = tag.split(['-', '_']).next().unwrap_or(tag).to_lowercase();
        if registry.is_valid(&primary) {
            return Some(primary);
        }
    }
    None
}

/// Value of `name` inside a raw `Cookie` header.
fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}
