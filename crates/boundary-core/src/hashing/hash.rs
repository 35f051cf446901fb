use blake3::Hasher;
use serde_json::Value;

use super::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Digest de un valor JSON sobre su forma canónica.
pub fn digest_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}
