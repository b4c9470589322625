//! Record storage subsystem
//!
//! Holds the person records in a single XML document and exposes the
//! four record operations over it.
//!
//! # Design Principles
//!
//! - One document, rewritten in full on every mutation
//! - No cache: every operation loads the document again
//! - Ids are positional (`index + 1`) and never persisted
//! - Email is unique at create time only
//! - Update and delete on an unknown id succeed without changing anything

mod backend;
mod codec;
mod errors;
mod record;
mod store;

pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use codec::{decode, empty_document, encode, ROOT_ELEMENT};
pub use errors::{StorageError, StorageResult, StoreError, StoreResult};
pub use record::{number_records, Record, RecordFields};
pub use store::RecordStore;
