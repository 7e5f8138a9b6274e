//! # Registry Service
//!
//! The four registry use cases, orchestrated over a [`RecordStore`].
//!
//! ## Use Cases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RegistryService<S>                                 │
//! │                                                                         │
//! │  fetch_by_code(code)                                                   │
//! │    get_by_code ──NotFound──► CodeNotFound                              │
//! │        │                                                                │
//! │        ├── branch code ──────────────► record                          │
//! │        └── headquarter code                                             │
//! │              get_branches_by_prefix ─► record + branches (maybe [])    │
//! │                                                                         │
//! │  fetch_by_country(iso2)                                                │
//! │    get_by_country ──empty──► CountryNotFound                           │
//! │    get_country_name ─NotFound─► CountryNotFound                        │
//! │                                                                         │
//! │  add(candidate)                                                        │
//! │    validate ──violations──► ValidationFailed                           │
//! │    normalize                                                            │
//! │    get_by_code ──found──► CodeAlreadyExists                            │
//! │    insert ──UniqueViolation (lost race)──► CodeAlreadyExists           │
//! │                                                                         │
//! │  delete(code)                                                          │
//! │    normalize                                                            │
//! │    get_by_code ──NotFound──► CodeNotFound                              │
//! │    delete_by_code                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The service holds no mutable state; clone it or share it freely. The
//! existence check in `add` is only there for a better error. The store's
//! primary key is what actually decides a race between two `add` calls for
//! the same code.
//!
//! ## Deadline
//! With [`RegistryService::with_deadline`] every operation runs under
//! `tokio::time::timeout`. On expiry the pending store future is dropped and
//! the caller gets [`RegistryError::Timeout`].

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::classifier::{is_headquarter, normalize_code};
use crate::error::{RegistryError, RegistryResult};
use crate::store::{RecordStore, StoreError};
use crate::types::{BankCode, CodeDetails, CountryCodes};
use crate::validation::validate;

/// Stateless orchestrator for registry use cases.
#[derive(Debug, Clone)]
pub struct RegistryService<S> {
    store: S,
    deadline: Option<Duration>,
}

impl<S: RecordStore> RegistryService<S> {
    /// Creates a service over `store` with no deadline.
    pub fn new(store: S) -> Self {
        RegistryService {
            store,
            deadline: None,
        }
    }

    /// Bounds every operation by `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up a code, expanding branches for headquarter codes.
    pub async fn fetch_by_code(&self, code: &str) -> RegistryResult<CodeDetails> {
        self.within(self.fetch_by_code_unbounded(code)).await
    }

    /// Lists every code registered for a country.
    pub async fn fetch_by_country(&self, iso2: &str) -> RegistryResult<CountryCodes> {
        self.within(self.fetch_by_country_unbounded(iso2)).await
    }

    /// Validates, normalizes and stores a new record.
    ///
    /// ## Returns
    /// The record as stored (upper-cased keys, trimmed text).
    pub async fn add(&self, candidate: BankCode) -> RegistryResult<BankCode> {
        self.within(self.add_unbounded(candidate)).await
    }

    /// Removes a record by code.
    pub async fn delete(&self, code: &str) -> RegistryResult<()> {
        self.within(self.delete_unbounded(code)).await
    }

    // =========================================================================
    // Use-case bodies
    // =========================================================================

    async fn fetch_by_code_unbounded(&self, code: &str) -> RegistryResult<CodeDetails> {
        let code = normalize_code(code);
        debug!(code = %code, "Fetching SWIFT code");

        let record = self
            .store
            .get_by_code(&code)
            .await
            .map_err(|e| not_found_as(e, || RegistryError::CodeNotFound(code.clone())))?;

        // Classified on the requested code, not on the stored flag.
        if !is_headquarter(&code) {
            return Ok(CodeDetails {
                record,
                branches: None,
            });
        }

        let branches = self.store.get_branches_by_prefix(&code).await?;
        debug!(code = %code, branches = branches.len(), "Expanded headquarter");

        Ok(CodeDetails {
            record,
            branches: Some(branches),
        })
    }

    async fn fetch_by_country_unbounded(&self, iso2: &str) -> RegistryResult<CountryCodes> {
        let iso2 = normalize_code(iso2);
        debug!(country = %iso2, "Fetching SWIFT codes by country");

        let codes = self.store.get_by_country(&iso2).await?;
        if codes.is_empty() {
            return Err(RegistryError::CountryNotFound(iso2));
        }

        let country_name = self
            .store
            .get_country_name(&iso2)
            .await
            .map_err(|e| not_found_as(e, || RegistryError::CountryNotFound(iso2.clone())))?;

        Ok(CountryCodes {
            country_iso2: iso2,
            country_name,
            codes,
        })
    }

    async fn add_unbounded(&self, candidate: BankCode) -> RegistryResult<BankCode> {
        if let Err(violations) = validate(&candidate) {
            debug!(code = %candidate.code, %violations, "Rejected candidate");
            return Err(RegistryError::ValidationFailed(violations));
        }

        let record = candidate.normalized();

        match self.store.get_by_code(&record.code).await {
            Ok(_) => return Err(RegistryError::CodeAlreadyExists(record.code)),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        match self.store.insert(&record).await {
            Ok(()) => {}
            Err(StoreError::UniqueViolation(_)) => {
                warn!(code = %record.code, "Insert lost uniqueness race");
                return Err(RegistryError::CodeAlreadyExists(record.code));
            }
            Err(e) => return Err(e.into()),
        }

        info!(code = %record.code, headquarter = record.is_headquarter, "SWIFT code added");
        Ok(record)
    }

    async fn delete_unbounded(&self, code: &str) -> RegistryResult<()> {
        let code = normalize_code(code);

        self.store
            .get_by_code(&code)
            .await
            .map_err(|e| not_found_as(e, || RegistryError::CodeNotFound(code.clone())))?;

        self.store.delete_by_code(&code).await?;

        info!(code = %code, "SWIFT code deleted");
        Ok(())
    }

    async fn within<T, F>(&self, operation: F) -> RegistryResult<T>
    where
        F: Future<Output = RegistryResult<T>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, operation)
                .await
                .map_err(|_| RegistryError::Timeout(deadline))?,
            None => operation.await,
        }
    }
}

/// Maps the store's `NotFound` to a domain kind; everything else passes through.
fn not_found_as(err: StoreError, domain: impl FnOnce() -> RegistryError) -> RegistryError {
    match err {
        StoreError::NotFound => domain(),
        other => RegistryError::Store(other),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::classifier::are_institution_mates;
    use crate::error::{Field, ViolationKind};
    use crate::store::StoreResult;
    use crate::types::BankCodeSummary;

    /// In-memory store with knobs for failure injection.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<BTreeMap<String, BankCode>>,
        /// Returned by every call when set.
        failure: Option<StoreError>,
        /// `get_by_code` always misses, as if a concurrent insert had not
        /// been visible yet.
        stale_reads: bool,
        /// Sleep before answering.
        latency: Option<Duration>,
    }

    impl MemoryStore {
        fn with_rows(records: Vec<BankCode>) -> Self {
            let store = MemoryStore::default();
            {
                let mut rows = store.rows.lock().unwrap();
                for r in records {
                    rows.insert(r.code.clone(), r);
                }
            }
            store
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        async fn enter(&self) -> StoreResult<()> {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            match &self.failure {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn get_by_code(&self, code: &str) -> StoreResult<BankCode> {
            self.enter().await?;
            if self.stale_reads {
                return Err(StoreError::NotFound);
            }
            self.rows
                .lock()
                .unwrap()
                .get(code)
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn get_branches_by_prefix(&self, code: &str) -> StoreResult<Vec<BankCodeSummary>> {
            self.enter().await?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.code != code && are_institution_mates(&r.code, code))
                .map(BankCode::summary)
                .collect())
        }

        async fn get_by_country(&self, iso2: &str) -> StoreResult<Vec<BankCodeSummary>> {
            self.enter().await?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.country_iso2 == iso2)
                .map(BankCode::summary)
                .collect())
        }

        async fn get_country_name(&self, iso2: &str) -> StoreResult<String> {
            self.enter().await?;
            self.rows
                .lock()
                .unwrap()
                .values()
                .find(|r| r.country_iso2 == iso2)
                .map(|r| r.country_name.clone())
                .ok_or(StoreError::NotFound)
        }

        async fn insert(&self, record: &BankCode) -> StoreResult<()> {
            self.enter().await?;
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&record.code) {
                return Err(StoreError::UniqueViolation("swift_codes.code".to_string()));
            }
            rows.insert(record.code.clone(), record.clone());
            Ok(())
        }

        async fn delete_by_code(&self, code: &str) -> StoreResult<()> {
            self.enter().await?;
            self.rows.lock().unwrap().remove(code);
            Ok(())
        }
    }

    fn record(code: &str, iso2: &str, country: &str) -> BankCode {
        BankCode {
            code: code.to_string(),
            bank_name: format!("Bank {code}"),
            address: "1 Test Street".to_string(),
            country_iso2: iso2.to_string(),
            country_name: country.to_string(),
            is_headquarter: is_headquarter(code),
            town_name: None,
        }
    }

    fn service(records: Vec<BankCode>) -> RegistryService<Arc<MemoryStore>> {
        RegistryService::new(Arc::new(MemoryStore::with_rows(records)))
    }

    // -------------------------------------------------------------------------
    // fetch_by_code
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_headquarter_expands_branches() {
        let svc = service(vec![
            record("ABCDEF12XXX", "US", "UNITED STATES"),
            record("ABCDEF12ABC", "US", "UNITED STATES"),
            record("ZZZZZZ12ABC", "US", "UNITED STATES"),
        ]);

        let details = svc.fetch_by_code("ABCDEF12XXX").await.unwrap();
        assert_eq!(details.record.code, "ABCDEF12XXX");
        let branches = details.branches.unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].code, "ABCDEF12ABC");
    }

    #[tokio::test]
    async fn test_branch_has_no_branch_list() {
        let svc = service(vec![
            record("ABCDEF12XXX", "US", "UNITED STATES"),
            record("ABCDEF12ABC", "US", "UNITED STATES"),
        ]);

        let details = svc.fetch_by_code("ABCDEF12ABC").await.unwrap();
        assert_eq!(details.record.code, "ABCDEF12ABC");
        assert!(details.branches.is_none());
    }

    #[tokio::test]
    async fn test_headquarter_without_branches_gets_empty_list() {
        let svc = service(vec![record("ABCDEF12XXX", "US", "UNITED STATES")]);

        let details = svc.fetch_by_code("ABCDEF12XXX").await.unwrap();
        assert_eq!(details.branches, Some(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_lowercase_code() {
        let svc = service(vec![record("ABCDEF12XXX", "US", "UNITED STATES")]);
        let details = svc.fetch_by_code("abcdef12xxx").await.unwrap();
        assert_eq!(details.record.code, "ABCDEF12XXX");
    }

    #[tokio::test]
    async fn test_fetch_unknown_code() {
        let svc = service(vec![]);
        let err = svc.fetch_by_code("ABCDEF12XXX").await.unwrap_err();
        assert!(matches!(err, RegistryError::CodeNotFound(code) if code == "ABCDEF12XXX"));
    }

    #[tokio::test]
    async fn test_fetch_propagates_store_failure() {
        let store = MemoryStore {
            failure: Some(StoreError::Unknown("disk I/O error".to_string())),
            ..Default::default()
        };
        let svc = RegistryService::new(store);

        let err = svc.fetch_by_code("ABCDEF12XXX").await.unwrap_err();
        assert!(matches!(err, RegistryError::Store(StoreError::Unknown(_))));
    }

    // -------------------------------------------------------------------------
    // fetch_by_country
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_by_country() {
        let svc = service(vec![
            record("AAAAUS33XXX", "US", "UNITED STATES"),
            record("BBBBUS33ABC", "US", "UNITED STATES"),
            record("BPKOPLPWXXX", "PL", "POLAND"),
        ]);

        let result = svc.fetch_by_country("us").await.unwrap();
        assert_eq!(result.country_iso2, "US");
        assert_eq!(result.country_name, "UNITED STATES");
        let codes: Vec<&str> = result.codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["AAAAUS33XXX", "BBBBUS33ABC"]);
    }

    #[tokio::test]
    async fn test_fetch_by_country_empty_is_not_found() {
        let svc = service(vec![record("BPKOPLPWXXX", "PL", "POLAND")]);
        let err = svc.fetch_by_country("ZZ").await.unwrap_err();
        assert!(matches!(err, RegistryError::CountryNotFound(iso2) if iso2 == "ZZ"));
    }

    // -------------------------------------------------------------------------
    // add
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_then_fetch_round_trip() {
        let svc = service(vec![]);
        let mut candidate = record("abcdef12xxx", "us", "United States");
        candidate.is_headquarter = true;

        let stored = svc.add(candidate.clone()).await.unwrap();
        let fetched = svc.fetch_by_code(&candidate.code).await.unwrap();

        assert_eq!(fetched.record, candidate.normalized());
        assert_eq!(fetched.record, stored);
    }

    #[tokio::test]
    async fn test_add_twice_conflicts() {
        let svc = service(vec![]);
        let candidate = record("ABCDEF12XXX", "US", "UNITED STATES");

        svc.add(candidate.clone()).await.unwrap();
        let err = svc.add(candidate).await.unwrap_err();
        assert!(matches!(err, RegistryError::CodeAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_add_conflicts_case_insensitively() {
        let svc = service(vec![record("ABCDEF12XXX", "US", "UNITED STATES")]);
        let err = svc
            .add(record("abcdef12xxx", "US", "UNITED STATES"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::CodeAlreadyExists(code) if code == "ABCDEF12XXX"));
    }

    #[tokio::test]
    async fn test_add_lost_race_reports_conflict() {
        let store = MemoryStore {
            stale_reads: true,
            ..MemoryStore::with_rows(vec![record("ABCDEF12XXX", "US", "UNITED STATES")])
        };
        let svc = RegistryService::new(store);

        let err = svc
            .add(record("ABCDEF12XXX", "US", "UNITED STATES"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::CodeAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_add_invalid_code_is_rejected_before_store() {
        let svc = service(vec![]);

        for code in ["ABCDEF12", "ABCDEF12XXXX", "ABCDEF-2XXX", ""] {
            let err = svc
                .add(record(code, "US", "UNITED STATES"))
                .await
                .unwrap_err();
            match err {
                RegistryError::ValidationFailed(v) => assert!(v.has_field(Field::Code), "{code}"),
                other => panic!("unexpected error for {code}: {other:?}"),
            }
        }
        assert_eq!(svc.store().len(), 0);
    }

    #[tokio::test]
    async fn test_add_headquarter_mismatch() {
        let svc = service(vec![]);
        let mut candidate = record("ABCDEF12XXX", "US", "UNITED STATES");
        candidate.is_headquarter = false;

        let err = svc.add(candidate).await.unwrap_err();
        match err {
            RegistryError::ValidationFailed(v) => {
                assert!(v.contains(Field::IsHeadquarter, ViolationKind::HeadquarterCodeMismatch))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_propagates_lookup_failure() {
        let store = MemoryStore {
            failure: Some(StoreError::Unknown("database is locked".to_string())),
            ..Default::default()
        };
        let svc = RegistryService::new(store);

        let err = svc
            .add(record("ABCDEF12XXX", "US", "UNITED STATES"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Store(StoreError::Unknown(_))));
    }

    // -------------------------------------------------------------------------
    // delete
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_delete_existing() {
        let svc = service(vec![record("ABCDEF12XXX", "US", "UNITED STATES")]);
        svc.delete("abcdef12xxx").await.unwrap();
        assert_eq!(svc.store().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_always_not_found() {
        let svc = service(vec![]);
        for _ in 0..3 {
            let err = svc.delete("ABCDEF12XXX").await.unwrap_err();
            assert!(matches!(err, RegistryError::CodeNotFound(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_then_fetch_is_not_found() {
        let svc = service(vec![record("ABCDEF12ABC", "US", "UNITED STATES")]);
        svc.delete("ABCDEF12ABC").await.unwrap();
        let err = svc.fetch_by_code("ABCDEF12ABC").await.unwrap_err();
        assert!(matches!(err, RegistryError::CodeNotFound(_)));
    }

    // -------------------------------------------------------------------------
    // deadline
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_deadline_expiry_times_out() {
        let store = MemoryStore {
            latency: Some(Duration::from_millis(500)),
            ..Default::default()
        };
        let svc = RegistryService::new(store).with_deadline(Duration::from_millis(20));

        let err = svc.fetch_by_code("ABCDEF12XXX").await.unwrap_err();
        assert!(matches!(err, RegistryError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_deadline_not_reached() {
        let svc = service(vec![record("ABCDEF12ABC", "US", "UNITED STATES")])
            .with_deadline(Duration::from_secs(5));
        assert!(svc.fetch_by_code("ABCDEF12ABC").await.is_ok());
    }
}
