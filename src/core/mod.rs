//! Digest engine: SHA-256 and the hex digests the cache is keyed by

pub mod digest;
pub mod sha256;

pub use digest::{digest_of_file_contents, digest_of_string};
