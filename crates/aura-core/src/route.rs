//! Route input parsing.

use thiserror::Error;

/// Maximum number of stops in one briefing.
pub const MAX_ROUTE_STOPS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route is empty")]
    Empty,
    #[error("invalid airport identifier '{0}'")]
    InvalidIdent(String),
    #[error("route has {0} stops, at most {MAX_ROUTE_STOPS} are allowed")]
    TooManyStops(usize),
}

/// Parse a route such as `"KRIC KJFK, kord"` into upper-case identifiers.
///
/// Identifiers are separated by whitespace and/or commas and must be 3-4
/// ASCII letters or digits.
pub fn parse_route(input: &str) -> Result<Vec<String>, RouteError> {
    let idents: Vec<String> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();

    if idents.is_empty() {
        return Err(RouteError::Empty);
    }
    if idents.len() > MAX_ROUTE_STOPS {
        return Err(RouteError::TooManyStops(idents.len()));
    }
    if let Some(bad) = idents.iter().find(|ident| !is_valid_ident(ident)) {
        return Err(RouteError::InvalidIdent(bad.clone()));
    }
    Ok(idents)
}

fn is_valid_ident(ident: &str) -> bool {
    (3..=4).contains(&ident.len()) && ident.chars().all(|c| c.is_ascii_alphanumeric())
}
