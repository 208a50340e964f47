//! Full-text search index mirrors.
//!
//! Search-enabled entities (weekdays, schedule templates) mirror their writes
//! into a [`SearchRepository`] so the `/_search/*` endpoints can answer
//! free-text queries. Mirroring is best effort: an index failure is logged
//! and never rolls back the primary write, so index and store are only
//! eventually consistent.

mod index;

pub use index::{InMemoryIndex, SearchDocument, SearchRepository};
