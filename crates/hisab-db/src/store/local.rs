//! # Local Record Store
//!
//! Device-local key-value store: one key per (kind, tenant), each holding the
//! JSON array of that tenant's records in insertion order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key                          value                                     │
//! │  ───────────────────────────  ──────────────────────────────────────    │
//! │  "products-shop1"             [{"id":"..","name":"Rice",..}, ..]        │
//! │  "credits-shop1"              [{"id":"..","person":"Ali",..}]           │
//! │  "expenses-shop1"             [{"id":"..","name":"Rent",..}]            │
//! │  "products-shop2"             [...]                                     │
//! │                                                                         │
//! │  With a directory, each key is mirrored to <dir>/<key>.json            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Order
//! 1. Build the new array from the current one
//! 2. Write it to `<key>.json.tmp`, then rename over `<key>.json`
//! 3. Only then update the in-memory map
//!
//! A failed file write returns `DbError::Io` and leaves both the file and the
//! map as they were.

use async_trait::async_trait;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use hisab_core::{new_record_id, LedgerRecord, RecordKind, TenantId};

use super::RecordStore;
use crate::error::{DbError, DbResult};

const FILE_EXTENSION: &str = "json";

// =============================================================================
// Local Store
// =============================================================================

/// Key-value record store, in memory or mirrored to a directory.
///
/// Cheap to clone; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    root: Option<Arc<PathBuf>>,
}

impl LocalStore {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        LocalStore::default()
    }

    /// Opens (creating if needed) a store backed by `dir`.
    ///
    /// Every `*.json` file in the directory is loaded as one key.
    pub async fn open(dir: impl AsRef<Path>) -> DbResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;

        let mut entries = HashMap::new();
        let mut read_dir = tokio::fs::read_dir(&dir).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_key)
            else {
                continue;
            };

            let contents = tokio::fs::read_to_string(&path).await?;
            entries.insert(key, contents);
        }

        info!(path = %dir.display(), keys = entries.len(), "Local store opened");

        Ok(LocalStore {
            entries: Arc::new(RwLock::new(entries)),
            root: Some(Arc::new(dir)),
        })
    }

    /// Directory backing this store, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref().map(PathBuf::as_path)
    }

    /// Storage key for a kind and tenant: `"{kind}-{tenantId}"`.
    pub fn key(kind: RecordKind, tenant: &TenantId) -> String {
        format!("{}-{}", kind.local_key(), tenant.as_str())
    }

    fn decode<R: LedgerRecord>(entries: &HashMap<String, String>, key: &str) -> DbResult<Vec<R>> {
        match entries.get(key) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persists `records` under `key`, file first, then map.
    async fn commit<R: LedgerRecord>(
        &self,
        entries: &mut HashMap<String, String>,
        key: String,
        records: &[R],
    ) -> DbResult<()> {
        let raw = serde_json::to_string(records)?;

        if let Some(root) = &self.root {
            let path = root.join(format!("{}.{}", encode_key(&key), FILE_EXTENSION));
            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, raw.as_bytes()).await?;
            tokio::fs::rename(&tmp, &path).await?;
        }

        entries.insert(key, raw);
        Ok(())
    }
}

// =============================================================================
// RecordStore Implementation
// =============================================================================

#[async_trait]
impl<R: LedgerRecord> RecordStore<R> for LocalStore {
    async fn list(&self, tenant: &TenantId) -> DbResult<Vec<R>> {
        let key = Self::key(R::KIND, tenant);
        let entries = self.entries.read().await;
        let records = Self::decode::<R>(&entries, &key)?;

        debug!(tenant = %tenant, kind = %R::KIND, count = records.len(), "Listed local records");
        Ok(records)
    }

    async fn insert(&self, tenant: &TenantId, record: R) -> DbResult<R> {
        let record = if record.id().is_empty() {
            record.with_id(new_record_id())
        } else {
            record
        };

        let key = Self::key(R::KIND, tenant);
        let mut entries = self.entries.write().await;
        let mut records = Self::decode::<R>(&entries, &key)?;

        if records.iter().any(|r| r.id() == record.id()) {
            return Err(DbError::duplicate("id", record.id()));
        }

        records.push(record.clone());
        self.commit(&mut entries, key, &records).await?;

        debug!(tenant = %tenant, kind = %R::KIND, id = %record.id(), "Inserted local record");
        Ok(record)
    }

    async fn update(&self, tenant: &TenantId, id: &str, record: R) -> DbResult<()> {
        let key = Self::key(R::KIND, tenant);
        let mut entries = self.entries.write().await;
        let mut records = Self::decode::<R>(&entries, &key)?;

        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DbError::not_found(R::KIND.to_string(), id))?;
        *slot = record.with_id(id.to_string());

        self.commit(&mut entries, key, &records).await?;

        debug!(tenant = %tenant, kind = %R::KIND, id = %id, "Updated local record");
        Ok(())
    }

    async fn delete(&self, tenant: &TenantId, id: &str) -> DbResult<()> {
        let key = Self::key(R::KIND, tenant);
        let mut entries = self.entries.write().await;
        let mut records = Self::decode::<R>(&entries, &key)?;

        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| DbError::not_found(R::KIND.to_string(), id))?;
        records.remove(position);

        self.commit(&mut entries, key, &records).await?;

        debug!(tenant = %tenant, kind = %R::KIND, id = %id, "Deleted local record");
        Ok(())
    }
}

// =============================================================================
// File Names
// =============================================================================
// Tenant ids may hold any printable character. File names keep only lowercase
// letters, digits, `-` and `_`; everything else, uppercase included, is
// percent-encoded so that keys differing only in case never share a file on
// case-insensitive filesystems.

const FILE_NAME: &AsciiSet = &file_name_set();

const fn file_name_set() -> AsciiSet {
    let mut set = NON_ALPHANUMERIC.remove(b'-').remove(b'_');
    let mut upper = b'A';
    while upper <= b'Z' {
        set = set.add(upper);
        upper += 1;
    }
    set
}

fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, FILE_NAME).to_string()
}

/// Decodes a file stem; `None` unless it is exactly what `encode_key` writes.
fn decode_key(name: &str) -> Option<String> {
    let key = percent_decode_str(name).decode_utf8().ok()?.into_owned();
    (encode_key(&key) == name).then_some(key)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hisab_core::{CreditForm, CreditRecord, SaleForm, SaleRecord};

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).unwrap()
    }

    fn credit(id: &str, person: &str, amount: i32) -> CreditRecord {
        CreditRecord::from_form(id.to_string(), &CreditForm::new(person, "Sugar bag", amount))
            .unwrap()
    }

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("products-shop_1"), "products-shop_1");
        assert_eq!(encode_key("credits-a/b.c"), "credits-a%2Fb%2Ec");
        assert_eq!(encode_key("products-Shop1"), "products-%53hop1");
        assert_eq!(decode_key("credits-a%2Fb%2Ec").unwrap(), "credits-a/b.c");
        assert_eq!(decode_key("products-%53hop1").unwrap(), "products-Shop1");
        assert_eq!(decode_key(&encode_key("expenses-دکان")).unwrap(), "expenses-دکان");

        // Only canonical names are accepted
        assert!(decode_key("bad%Z").is_none());
        assert!(decode_key("products-Shop1").is_none());
        assert!(decode_key("credits-a%2fb").is_none());
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_keeps_order() {
        let store = LocalStore::in_memory();
        let shop = tenant("shop1");

        let first = store.insert(&shop, credit("", "Ali", 200)).await.unwrap();
        let second = store.insert(&shop, credit("given-id", "Sara", 50)).await.unwrap();

        assert!(!first.id.is_empty());
        assert_eq!(second.id, "given-id");

        let listed: Vec<CreditRecord> = store.list(&shop).await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = LocalStore::in_memory();
        let shop = tenant("shop1");

        store.insert(&shop, credit("c1", "Ali", 1)).await.unwrap();
        let err = store.insert(&shop, credit("c1", "Ali", 2)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Same id under another tenant is fine
        store.insert(&tenant("shop2"), credit("c1", "Ali", 3)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let store = LocalStore::in_memory();
        let shop = tenant("shop1");

        let err = store
            .update(&shop, "nope", credit("", "Ali", 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = RecordStore::<CreditRecord>::delete(&store, &shop, "nope")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = LocalStore::in_memory();
        let shop = tenant("shop1");

        store.insert(&shop, credit("a", "Ali", 1)).await.unwrap();
        store.insert(&shop, credit("b", "Bilal", 2)).await.unwrap();
        store.update(&shop, "a", credit("", "Asad", 9)).await.unwrap();

        let listed: Vec<CreditRecord> = store.list(&shop).await.unwrap();
        assert_eq!(listed[0].id, "a");
        assert_eq!(listed[0].person, "Asad");
        assert_eq!(listed[0].amount.value(), 9.0);
        assert_eq!(listed[1].id, "b");
    }

    #[tokio::test]
    async fn test_kinds_are_separate_keys() {
        let store = LocalStore::in_memory();
        let shop = tenant("shop1");

        store.insert(&shop, credit("x", "Ali", 1)).await.unwrap();
        let sales: Vec<SaleRecord> = store.list(&shop).await.unwrap();
        assert!(sales.is_empty());
    }

    #[tokio::test]
    async fn test_directory_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let shop = tenant("shop/1");

        {
            let store = LocalStore::open(dir.path()).await.unwrap();
            let sale =
                SaleRecord::from_form(String::new(), &SaleForm::new("Rice", 10, 5, 8)).unwrap();
            store.insert(&shop, sale).await.unwrap();
        }

        assert!(dir.path().join("products-shop%2F1.json").exists());

        let reopened = LocalStore::open(dir.path()).await.unwrap();
        let sales: Vec<SaleRecord> = reopened.list(&shop).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].profit.value(), 30.0);
    }

    #[tokio::test]
    async fn test_tenants_differing_in_case_keep_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let upper = tenant("Shop1");
        let lower = tenant("shop1");

        {
            let store = LocalStore::open(dir.path()).await.unwrap();
            assert_eq!(store.root(), Some(dir.path()));
            store.insert(&upper, credit("u", "Ali", 100)).await.unwrap();
            store.insert(&lower, credit("l", "Sara", 5)).await.unwrap();
        }

        // File names must differ even when compared case-insensitively
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_lowercase())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 2);

        let reopened = LocalStore::open(dir.path()).await.unwrap();
        let upper_credits: Vec<CreditRecord> = reopened.list(&upper).await.unwrap();
        let lower_credits: Vec<CreditRecord> = reopened.list(&lower).await.unwrap();
        assert_eq!(upper_credits.len(), 1);
        assert_eq!(upper_credits[0].person, "Ali");
        assert_eq!(lower_credits.len(), 1);
        assert_eq!(lower_credits[0].person, "Sara");
    }

    #[tokio::test]
    async fn test_in_memory_has_no_root() {
        assert!(LocalStore::in_memory().root().is_none());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let shop = tenant("shop1");

        let store = LocalStore::open(&root).await.unwrap();
        store.insert(&shop, credit("a", "Ali", 1)).await.unwrap();

        // Swap the directory for a plain file so every write fails
        std::fs::remove_dir_all(&root).unwrap();
        std::fs::write(&root, b"not a directory").unwrap();

        let err = store.insert(&shop, credit("b", "Bilal", 2)).await.unwrap_err();
        assert!(matches!(err, DbError::Io(_)));

        let listed: Vec<CreditRecord> = store.list(&shop).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "a");
    }
}
