//! Base64 payload codec.
//!
//! Raw Level II files are arbitrary binary, so the encoder works on bytes
//! directly and never passes through a text decoding step.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode a raw upstream payload as standard base64 (with padding).
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a `base64Data` field back into the original bytes.
pub fn decode_payload(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}
