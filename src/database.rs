//! Submission store backed by the embedded redb database
//!
//! All submissions live in a single table keyed by a store-assigned sequence
//! number. Sequence numbers strictly increase with insertion order, so
//! iterating the table backwards yields newest-first listings with a total,
//! stable order even when two records share a creation timestamp.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{NewSubmission, Submission, SubmissionPage};
use crate::pagination::PageRequest;

/// Main submissions table
///
/// Key: insertion sequence number, starting at 1
/// Value: JSON-serialized `Submission`
///
/// Example:
/// - Key: 42
/// - Value: '{"id":"3f2c...","name":"Ada","email":null,"message":null,"created_at":"..."}'
pub const TABLE_SUBMISSIONS: TableDefinition<u64, &str> = TableDefinition::new("submissions_v1");

/// Store bookkeeping that must not depend on decoding stored records
///
/// - `last_created_micros`: creation timestamp of the newest record, in
///   microseconds since the Unix epoch
pub const TABLE_META: TableDefinition<&str, i64> = TableDefinition::new("meta_v1");

const LAST_CREATED_KEY: &str = "last_created_micros";

/// Shared handle to the submission store
///
/// Opened once at startup and cloned into every request. Cloning only bumps
/// the reference count of the underlying database.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Creates or opens the database file and makes sure the tables exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        init_db(path).map(|db| Self { db: Arc::new(db) })
    }

    /// Inserts one submission and returns it as stored
    ///
    /// The id and creation timestamp are assigned here. The timestamp never
    /// goes below the last one handed out (kept in `TABLE_META`), so
    /// creation order and key order agree even if the wall clock steps
    /// backwards. Stored records are never decoded on this path.
    pub fn insert(&self, new: NewSubmission) -> Result<Submission, StoreError> {
        let write_txn = self.db.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(TABLE_SUBMISSIONS)?;
            let mut meta = write_txn.open_table(TABLE_META)?;

            let next_seq = match table.last()? {
                Some((key, _)) => key.value() + 1,
                None => 1,
            };
            let floor = meta
                .get(LAST_CREATED_KEY)?
                .and_then(|micros| DateTime::from_timestamp_micros(micros.value()));

            let now = Utc::now();
            let record = Submission {
                id: Uuid::new_v4(),
                name: new.name,
                email: new.email,
                message: new.message,
                created_at: floor.map_or(now, |floor| floor.max(now)),
            };

            let json = serde_json::to_string(&record)?;
            table.insert(next_seq, json.as_str())?;
            meta.insert(LAST_CREATED_KEY, record.created_at.timestamp_micros())?;
            record
        };
        write_txn.commit()?;

        Ok(record)
    }

    /// Returns one page of submissions, newest first, with the total count
    ///
    /// Count and page come from the same read snapshot.
    pub fn page(&self, page: PageRequest) -> Result<SubmissionPage, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_SUBMISSIONS)?;

        let count = table.len()?;
        let items = table
            .iter()?
            .rev()
            .skip(page.skip)
            .take(page.top)
            .map(|entry| {
                let (_, value) = entry?;
                Ok(serde_json::from_str::<Submission>(value.value())?)
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(SubmissionPage {
            items,
            count,
            top: page.top,
            skip: page.skip,
        })
    }

    /// Total number of stored submissions
    pub fn count(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_SUBMISSIONS)?;
        Ok(table.len()?)
    }
}

/// Initializes the embedded database and creates the store tables
///
/// # Example
///
/// ```no_run
/// # use formbox::database::init_db;
/// let db = init_db("submissions.db").expect("Failed to initialize database");
/// ```
pub fn init_db(path: impl AsRef<Path>) -> Result<Database, StoreError> {
    let db = Database::create(path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_SUBMISSIONS)?;
        write_txn.open_table(TABLE_META)?;
    }
    write_txn.commit()?;

    Ok(db)
}
