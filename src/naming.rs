//! Deterministic identifier derivation.
//!
//! Route declarations are named by stripping every character that is not an
//! ASCII letter or digit from the route key (`"GET /items"` becomes
//! `"GETitems"`). Two distinct keys deriving the same identifier is a hard
//! error, detected before any declaration is produced; the alternative of
//! silently letting the later declaration win would hand the engine a graph
//! missing a resource.
//!
//! Index-suffixed names (`networkSecurityRulesdev0`) tie enumerated records
//! to their position in the input table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Route keys must be an uppercase HTTP method, one space, and a
/// slash-prefixed path.
static ROUTE_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+ /\S*$").expect("route key pattern is valid"));

/// Strips every character that is not an ASCII letter or digit.
pub fn sanitize_key(key: &str) -> String {
    key.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Whether a route key has the `METHOD /path` shape.
pub fn is_valid_route_key(key: &str) -> bool {
    ROUTE_KEY_PATTERN.is_match(key)
}

/// Derives one declaration identifier per route key, preserving input order.
///
/// Fails with [`Error::InvalidRouteKey`] on a malformed key and with
/// [`Error::IdentifierCollision`] if two distinct keys sanitize to the same
/// identifier.
pub fn derive_route_names<S: AsRef<str>>(keys: &[S]) -> Result<Vec<String>> {
    let mut claimed: IndexMap<String, &str> = IndexMap::with_capacity(keys.len());
    let mut names = Vec::with_capacity(keys.len());

    for key in keys {
        let key = key.as_ref();
        if !is_valid_route_key(key) {
            return Err(Error::InvalidRouteKey(key.to_string()));
        }

        let identifier = sanitize_key(key);
        if let Some(first) = claimed.get(&identifier) {
            return Err(Error::IdentifierCollision {
                first: (*first).to_string(),
                second: key.to_string(),
                identifier,
            });
        }
        claimed.insert(identifier.clone(), key);
        names.push(identifier);
    }

    Ok(names)
}

/// Builds an index-suffixed name: `{prefix}{stack}{index}`.
pub fn indexed_name(prefix: &str, stack: &str, index: usize) -> String {
    format!("{prefix}{stack}{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("GET /items"), "GETitems");
        assert_eq!(sanitize_key("GET /items/{id}"), "GETitemsid");
        assert_eq!(sanitize_key("POST /"), "POST");
    }

    #[test]
    fn test_derive_route_names_in_order() {
        let keys = [
            "GET /items",
            "PUT /items",
            "GET /items/{id}",
            "DELETE /items/{id}",
        ];
        let names = derive_route_names(&keys).unwrap();
        assert_eq!(
            names,
            vec!["GETitems", "PUTitems", "GETitemsid", "DELETEitemsid"]
        );
    }

    #[test]
    fn test_collision_rejected() {
        let keys = ["GET /items", "GET /item/s"];
        let err = derive_route_names(&keys).unwrap_err();
        match err {
            Error::IdentifierCollision {
                first,
                second,
                identifier,
            } => {
                assert_eq!(first, "GET /items");
                assert_eq!(second, "GET /item/s");
                assert_eq!(identifier, "GETitems");
            }
            other => panic!("expected collision, got {other}"),
        }
    }

    #[test]
    fn test_malformed_key_rejected() {
        let err = derive_route_names(&["GET/items"]).unwrap_err();
        assert!(matches!(err, Error::InvalidRouteKey(key) if key == "GET/items"));

        assert!(!is_valid_route_key("get /items"));
        assert!(!is_valid_route_key("GET items"));
        assert!(is_valid_route_key("DELETE /items/{id}"));
    }

    #[test]
    fn test_indexed_name() {
        assert_eq!(
            indexed_name("networkSecurityRules", "dev", 0),
            "networkSecurityRulesdev0"
        );
        assert_eq!(indexed_name("subnet", "prod", 11), "subnetprod11");
    }
}
