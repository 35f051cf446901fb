//! Canonicalización JSON y digests blake3.
//!
//! Se usa para dos identidades estables: el `definition_hash` de un pipeline y
//! el `input_digest` del payload de diagnóstico (el valor crudo no sale hacia
//! el sink).

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{digest_value, hash_str};
