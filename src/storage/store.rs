//! Record store
//!
//! Every operation is a full load-mutate-save cycle over the backend:
//! read and decode the whole document, apply one change, encode and
//! overwrite the whole document. Nothing is cached between calls.
//!
//! Ids are positional and recomputed on every load. Update and delete
//! accept any id; when none matches, the collection is saved unchanged
//! and the call still succeeds.
//!
//! Operations are serialized within the process. There is no protection
//! against other processes writing the same document.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::backend::{DocumentBackend, FileBackend};
use super::codec;
use super::errors::{StoreError, StoreResult, StorageResult};
use super::record::{Record, RecordFields};

/// Record store over a single document backend
#[derive(Debug)]
pub struct RecordStore {
    backend: Box<dyn DocumentBackend>,
    op_lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store over the given backend
    pub fn new(backend: impl DocumentBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            op_lock: Mutex::new(()),
        }
    }

    /// Create a store over the document file at `path`
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }

    /// Returns the backend's document location
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Load every record, numbered by position.
    pub fn list(&self) -> StoreResult<Vec<Record>> {
        let _guard = self.lock();
        Ok(self.load()?)
    }

    /// Append a new record unless its email is already taken.
    ///
    /// Returns the created record with its positional id.
    pub fn create(&self, fields: RecordFields) -> StoreResult<Record> {
        let _guard = self.lock();
        let mut records = self.load()?;

        if records.iter().any(|record| record.email() == fields.email) {
            warn!(email = %fields.email, "rejected create: email already exists");
            return Err(StoreError::DuplicateEmail(fields.email));
        }

        let record = Record::at_position(records.len(), fields);
        records.push(record.clone());
        self.save(&records)?;

        info!(id = record.id, "record created");
        Ok(record)
    }

    /// Overwrite all five fields of the record at positional `id`.
    pub fn update(&self, id: usize, fields: RecordFields) -> StoreResult<()> {
        let _guard = self.lock();
        let mut records = self.load()?;

        let mut updated = false;
        for record in records.iter_mut().filter(|record| record.id == id) {
            record.fields = fields.clone();
            updated = true;
        }
        self.save(&records)?;

        if updated {
            info!(id, "record updated");
        } else {
            debug!(id, "update matched no record");
        }
        Ok(())
    }

    /// Remove the record at positional `id`.
    ///
    /// Records after it move down one position, so their ids shift by one
    /// on the next load.
    pub fn delete(&self, id: usize) -> StoreResult<()> {
        let _guard = self.lock();
        let mut records = self.load()?;

        let before = records.len();
        records.retain(|record| record.id != id);
        self.save(&records)?;

        if records.len() < before {
            info!(id, "record deleted");
        } else {
            debug!(id, "delete matched no record");
        }
        Ok(())
    }

    /// Write an empty document.
    pub fn reset(&self) -> StoreResult<()> {
        let _guard = self.lock();
        self.save(&[])?;
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<Record>> {
        let records = match self.backend.read()? {
            Some(bytes) => codec::decode(&bytes)?,
            None => {
                debug!(location = %self.backend.location(), "document missing, starting empty");
                Vec::new()
            }
        };
        debug!(count = records.len(), "document loaded");
        Ok(records)
    }

    fn save(&self, records: &[Record]) -> StorageResult<()> {
        let bytes = codec::encode(records)?;
        self.backend.write(&bytes)?;
        debug!(count = records.len(), "document saved");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.op_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryBackend;
    use crate::storage::errors::StorageError;
    use std::sync::Arc;

    fn fields(name: &str, email: &str) -> RecordFields {
        RecordFields::new(name, "Doe", email, "100", "555")
    }

    fn store_with(names: &[&str]) -> RecordStore {
        let store = RecordStore::new(MemoryBackend::new());
        for name in names {
            store
                .create(fields(name, &format!("{}@example.com", name.to_lowercase())))
                .unwrap();
        }
        store
    }

    fn names(store: &RecordStore) -> Vec<String> {
        store
            .list()
            .unwrap()
            .into_iter()
            .map(|record| record.fields.name)
            .collect()
    }

    #[test]
    fn test_list_missing_document_is_empty() {
        let store = RecordStore::new(MemoryBackend::new());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_positional() {
        let store = store_with(&["Ann", "Bob", "Cid", "Dee"]);

        let records = store.list().unwrap();

        assert_eq!(records.len(), 4);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.id, index + 1);
        }
    }

    #[test]
    fn test_create_returns_next_id() {
        let store = store_with(&["Ann", "Bob"]);

        let created = store.create(fields("Cid", "cid@example.com")).unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(store.list().unwrap()[2], created);
    }

    #[test]
    fn test_create_duplicate_email_is_rejected() {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::new(backend.clone());
        store.create(fields("Ann", "ann@example.com")).unwrap();
        let before = backend.snapshot();

        let err = store.create(fields("Other", "ann@example.com")).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail(ref email) if email == "ann@example.com"));
        assert_eq!(backend.snapshot(), before);
        assert_eq!(names(&store), vec!["Ann"]);
    }

    #[test]
    fn test_duplicate_email_check_is_case_sensitive() {
        let store = store_with(&["Ann"]);

        store.create(fields("Ann2", "ANN@example.com")).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_overwrites_all_fields() {
        let store = store_with(&["Ann", "Bob"]);
        let replacement = RecordFields::new("Robert", "Smith", "bob@smith.io", "900", "777");

        store.update(2, replacement.clone()).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].fields, replacement);
        assert_eq!(records[0].fields.name, "Ann");
    }

    #[test]
    fn test_update_does_not_merge_missing_fields() {
        let store = store_with(&["Ann"]);
        let partial = RecordFields {
            name: "Annie".to_string(),
            ..RecordFields::default()
        };

        store.update(1, partial).unwrap();

        let record = &store.list().unwrap()[0];
        assert_eq!(record.fields.name, "Annie");
        assert_eq!(record.fields.email, "");
        assert_eq!(record.fields.salary, "");
    }

    #[test]
    fn test_update_allows_duplicate_email() {
        let store = store_with(&["Ann", "Bob"]);

        store.update(2, fields("Bob", "ann@example.com")).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records[0].email(), records[1].email());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = store_with(&["Ann", "Bob"]);
        let before = store.list().unwrap();

        store.update(999, fields("Zed", "zed@example.com")).unwrap();
        store.update(0, fields("Zed", "zed@example.com")).unwrap();

        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_update_unknown_id_still_saves() {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::new(backend.clone());
        assert!(backend.snapshot().is_none());

        store.update(1, fields("Ann", "ann@example.com")).unwrap();

        let saved = backend.snapshot().expect("update should write the document");
        assert!(codec::decode(&saved).unwrap().is_empty());
    }

    #[test]
    fn test_delete_shifts_ids() {
        let store = store_with(&["Ann", "Bob", "Cid"]);
        let before = store.list().unwrap();

        store.delete(2).unwrap();

        let after = store.list().unwrap();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].id, 1);
        assert_eq!(after[0].fields, before[0].fields);
        assert_eq!(after[1].id, 2);
        assert_eq!(after[1].fields, before[2].fields);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let store = store_with(&["Ann", "Bob"]);

        store.delete(3).unwrap();

        assert_eq!(names(&store), vec!["Ann", "Bob"]);
    }

    #[test]
    fn test_malformed_document_fails_every_operation_without_writing() {
        let corrupt = b"<root><row><name>A</name></row></root>".to_vec();
        let backend = Arc::new(MemoryBackend::with_content(corrupt.clone()));
        let store = RecordStore::new(backend.clone());

        let results = vec![
            store.list().map(|_| ()),
            store.create(fields("Ann", "ann@example.com")).map(|_| ()),
            store.update(1, fields("Ann", "ann@example.com")),
            store.delete(1),
        ];

        for result in results {
            match result {
                Err(StoreError::Storage(StorageError::MalformedDocument(_))) => {}
                other => panic!("expected malformed document error, got {:?}", other),
            }
        }
        assert_eq!(backend.snapshot().unwrap(), corrupt);
    }

    #[test]
    fn test_reset_empties_collection() {
        let store = store_with(&["Ann", "Bob"]);

        store.reset().unwrap();

        assert!(store.list().unwrap().is_empty());
    }
}
