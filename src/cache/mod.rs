//! Content-addressed build cache
//!
//! Every script gets one entry directory named after the SHA-256 of its
//! canonical path. The entry holds the compiled artifact and a `hash` file
//! with the content digest the artifact was built from. A build is reused
//! only while that digest matches the script's current content.

mod entry;
mod storage;

pub use entry::CacheEntry;
pub use storage::ContentCache;
