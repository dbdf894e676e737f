#![deny(missing_docs)]
#![doc = "Shared error taxonomy, provenance descriptors and canonical JSON helpers for HH candidate reconstruction."]

pub mod errors;
pub mod hash;
pub mod provenance;
pub mod serde;

pub use crate::errors::{ErrorInfo, HhError};
pub use crate::hash::{sha256_hex, stable_hash_string};
pub use crate::provenance::{RunProvenance, SchemaVersion};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes, to_pretty_json};
