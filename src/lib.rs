//! recordbook - person records kept in a single XML document
//!
//! The storage layer loads the whole document, applies one change and
//! rewrites it for every operation. The HTTP server and CLI are thin
//! layers over `storage::RecordStore`.

pub mod cli;
pub mod http_server;
pub mod storage;
