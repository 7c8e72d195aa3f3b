//! Property tests for naming and encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proptest::prelude::*;

use cloudplan::encoding::encode_custom_data;
use cloudplan::error::Error;
use cloudplan::naming::{derive_route_names, sanitize_key};

proptest! {
    /// Any ASCII script round-trips through the encoder.
    #[test]
    fn ascii_scripts_round_trip(script in "[ -~\n\t]{0,256}") {
        let encoded = encode_custom_data(&script).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        prop_assert_eq!(decoded, script.into_bytes());
    }

    /// The reported offset of a rejected script always points at a
    /// non-ASCII byte.
    #[test]
    fn rejection_offset_is_first_non_ascii(
        prefix in "[ -~]{0,32}",
        suffix in "[ -~]{0,32}",
    ) {
        let script = format!("{prefix}\u{00e9}{suffix}");
        match encode_custom_data(&script).unwrap_err() {
            Error::NonAsciiCustomData { offset } => {
                prop_assert_eq!(offset, prefix.len());
                prop_assert!(!script.as_bytes()[offset].is_ascii());
            }
            other => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Sanitized identifiers are always alphanumeric ASCII.
    #[test]
    fn sanitized_keys_are_alphanumeric(key in "\\PC{0,64}") {
        let name = sanitize_key(&key);
        prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    /// Valid route keys always derive, and the derived names match the
    /// sanitized keys one to one.
    #[test]
    fn distinct_identifiers_always_derive(suffix in "[a-z]{1,8}") {
        let keys = [format!("GET /{suffix}"), format!("PUT /{suffix}")];
        let names = derive_route_names(&keys).unwrap();
        prop_assert_eq!(names.len(), keys.len());
        for (name, key) in names.iter().zip(&keys) {
            prop_assert_eq!(name, &sanitize_key(key));
        }
    }
}

#[test]
fn colliding_identifiers_are_rejected() {
    // Distinct keys, same name once non-alphanumerics are stripped.
    let err = derive_route_names(&["GET /items", "GET /item/s"]).unwrap_err();
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
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_route_keys_are_rejected() {
    assert!(matches!(
        derive_route_names(&["GET/items"]).unwrap_err(),
        Error::InvalidRouteKey(key) if key == "GET/items"
    ));
    assert!(matches!(
        derive_route_names(&["get /items"]).unwrap_err(),
        Error::InvalidRouteKey(_)
    ));
}
