//! Legacy URL redirects
//!
//! The pre-relaunch site lived without locale prefixes and with different
//! section names. Inbound links to those URLs still matter for SEO, so a
//! static rule table maps them onto the new locale-prefixed structure with
//! permanent redirects. The table is consulted before the locale resolver;
//! a path matching no rule falls through untouched.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use once_cell::sync::Lazy;

/// One retired-URL mapping. The source may contain a single `:named`
/// wildcard segment which is substituted verbatim into the destination.
/// All rules answer with a permanent (308) redirect.
#[derive(Debug, Clone, Copy)]
pub struct RedirectRule {
    pub source: &'static str,
    pub destination: &'static str,
}

/// Retired URL structures, mapped onto the relaunched site.
pub const LEGACY_REDIRECTS: &[RedirectRule] = &[
    RedirectRule { source: "/home", destination: "/fr" },
    RedirectRule { source: "/accueil", destination: "/fr" },
    RedirectRule { source: "/creations", destination: "/fr/objets" },
    RedirectRule { source: "/creations/:slug", destination: "/fr/objet/:slug" },
    RedirectRule { source: "/realisations", destination: "/fr/projets" },
    RedirectRule { source: "/realisations/:slug", destination: "/fr/projet/:slug" },
    RedirectRule { source: "/matieres", destination: "/fr/matieres" },
    RedirectRule { source: "/a-propos", destination: "/fr/atelier" },
    RedirectRule { source: "/contact", destination: "/fr/contact" },
];

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

/// A rule with its pattern split into segments, ready for matching.
struct CompiledRule {
    source: Vec<Segment>,
    destination: Vec<Segment>,
    literal_count: usize,
}

static COMPILED: Lazy<Vec<CompiledRule>> =
    Lazy::new(|| LEGACY_REDIRECTS.iter().map(|rule| compile(rule)).collect());

fn compile(rule: &RedirectRule) -> CompiledRule {
    let source = split_segments(rule.source);
    let destination = split_segments(rule.destination);
    let literal_count =
        source.iter().filter(|segment| matches!(segment, Segment::Literal(_))).count();
    CompiledRule { source, destination, literal_count }
}

fn split_segments(pattern: &'static str) -> Vec<Segment> {
    pattern
        .split('/')
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_prefix(':') {
            Some(name) => Segment::Param(name),
            None => Segment::Literal(part),
        })
        .collect()
}

/// Destination for `path`, if any rule matches.
///
/// When several rules match, the one with the most literal segments wins,
/// declaration order breaking ties.
pub fn match_legacy(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

    COMPILED
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            apply(rule, &segments).map(|destination| (rule.literal_count, index, destination))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, _, destination)| destination)
}

/// Segment-exact match; no partial-segment wildcards.
fn apply(rule: &CompiledRule, segments: &[&str]) -> Option<String> {
    if rule.source.len() != segments.len() {
        return None;
    }

    let mut captured: Option<(&str, &str)> = None;
    for (pattern, segment) in rule.source.iter().zip(segments) {
        match pattern {
            Segment::Literal(literal) => {
                if literal != segment {
                    return None;
                }
            },
            Segment::Param(name) => captured = Some((name, segment)),
        }
    }

    let mut destination = String::new();
    for part in &rule.destination {
        destination.push('/');
        match part {
            Segment::Literal(literal) => destination.push_str(literal),
            Segment::Param(name) => match captured {
                Some((captured_name, value)) if captured_name == *name => {
                    destination.push_str(value)
                },
                _ => return None,
            },
        }
    }
    Some(destination)
}

/// Answer retired URLs with a permanent redirect; everything else proceeds
/// to the locale resolver.
pub async fn legacy_redirect_middleware(req: Request, next: Next) -> Response {
    if let Some(destination) = match_legacy(req.uri().path()) {
        tracing::debug!("Legacy redirect {} -> {}", req.uri().path(), destination);
        return Redirect::permanent(&destination).into_response();
    }
    next.run(req).await
}
