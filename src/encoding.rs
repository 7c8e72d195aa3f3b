//! Boot-script encoding for VM custom data.
//!
//! Azure delivers boot scripts through the `custom_data` field as base64
//! text. The encoder is a pure function with an explicit ASCII precondition:
//! a script containing a non-ASCII byte is rejected rather than encoded into
//! something the guest agent may mangle.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Encodes a boot script as standard-alphabet, padded base64.
///
/// Deterministic and side-effect free. Decoding the output reproduces the
/// exact input bytes, embedded newlines included.
pub fn encode_custom_data(script: &str) -> Result<String> {
    if let Some(offset) = script.bytes().position(|byte| !byte.is_ascii()) {
        return Err(Error::NonAsciiCustomData { offset });
    }
    Ok(STANDARD.encode(script.as_bytes()))
}
