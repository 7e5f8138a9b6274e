//! # CSV Bulk Import
//!
//! Loads a SWIFT code export into `swift_codes`.
//!
//! ## Source Layout
//! ```text
//! COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE
//! PL,BPKOPLPWXXX,BIC11,PKO BANK POLSKI S.A.,PULAWSKA 15,WARSZAWA,POLAND,Europe/Warsaw
//! ```
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  file ──► parse_csv ──► ParsedRows { records, skipped }                │
//! │              │                                                          │
//! │              ├── header row: ignored                                   │
//! │              ├── fewer than 8 columns: skipped                         │
//! │              ├── code not 11 characters: skipped                       │
//! │              ├── country code not 2 characters: skipped                │
//! │              └── otherwise: upper-case code / ISO2 / country name,     │
//! │                  derive is_headquarter from the XXX suffix             │
//! │                                                                         │
//! │  records ──► BankCodeRepository::insert_batch (one transaction,        │
//! │              ON CONFLICT(code) DO NOTHING)                              │
//! │                                                                         │
//! │  ──► ImportReport { read, inserted, skipped, duplicates }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Code type and time zone are read but not stored. Re-running an import
//! over the same file inserts nothing.

use std::io::Read;
use std::path::{Path, PathBuf};

use swift_core::classifier::{is_headquarter, normalize_code};
use swift_core::{BankCode, CODE_LENGTH, COUNTRY_CODE_LENGTH};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;

/// Minimum number of columns in a usable row.
pub const COLUMN_COUNT: usize = 8;

const COL_COUNTRY_ISO2: usize = 0;
const COL_CODE: usize = 1;
const COL_BANK_NAME: usize = 3;
const COL_ADDRESS: usize = 4;
const COL_TOWN: usize = 5;
const COL_COUNTRY_NAME: usize = 6;

/// Output of [`parse_csv`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRows {
    /// Rows that passed the structural checks, normalized.
    pub records: Vec<BankCode>,
    /// Rows discarded as malformed.
    pub skipped: usize,
}

/// Summary of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Data rows read (header excluded).
    pub read: usize,
    /// Rows written to the table.
    pub inserted: usize,
    /// Rows discarded as malformed.
    pub skipped: usize,
    /// Well-formed rows whose code was already stored or repeated in the file.
    pub duplicates: usize,
}

/// Parses a CSV export into normalized records.
///
/// Malformed rows are counted and dropped. Only an I/O failure on the
/// underlying reader aborts the parse.
pub fn parse_csv<R: Read>(reader: R) -> DbResult<ParsedRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedRows::default();

    for result in csv_reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable row");
                parsed.skipped += 1;
                continue;
            }
        };

        match record_from_row(&row) {
            Some(record) => parsed.records.push(record),
            None => {
                debug!(line = ?row.position().map(|p| p.line()), "Skipping malformed row");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

fn record_from_row(row: &csv::StringRecord) -> Option<BankCode> {
    if row.len() < COLUMN_COUNT {
        return None;
    }

    let code = normalize_code(row.get(COL_CODE)?);
    if code.chars().count() != CODE_LENGTH {
        return None;
    }

    let country_iso2 = normalize_code(row.get(COL_COUNTRY_ISO2)?);
    if country_iso2.chars().count() != COUNTRY_CODE_LENGTH {
        return None;
    }

    let town_name = row
        .get(COL_TOWN)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Some(BankCode {
        is_headquarter: is_headquarter(&code),
        code,
        bank_name: row.get(COL_BANK_NAME)?.to_string(),
        address: row.get(COL_ADDRESS)?.to_string(),
        country_iso2,
        country_name: row.get(COL_COUNTRY_NAME)?.to_uppercase(),
        town_name,
    })
}

/// Imports a CSV file into `db`.
///
/// ## Example
/// ```rust,ignore
/// let report = import_csv(&db, "data/swift_codes.csv").await?;
/// println!("inserted {} of {}", report.inserted, report.read);
/// ```
pub async fn import_csv(db: &Database, path: impl AsRef<Path>) -> DbResult<ImportReport> {
    let path: PathBuf = path.as_ref().to_path_buf();
    info!(path = %path.display(), "Importing SWIFT codes");

    let source = path.clone();
    let parsed = tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&source)
            .map_err(|e| DbError::ImportFailed(format!("{}: {e}", source.display())))?;
        parse_csv(file)
    })
    .await
    .map_err(|e| DbError::Internal(e.to_string()))??;

    let inserted = db.bank_codes().insert_batch(&parsed.records).await? as usize;

    let report = ImportReport {
        read: parsed.records.len() + parsed.skipped,
        inserted,
        skipped: parsed.skipped,
        duplicates: parsed.records.len() - inserted,
    };

    info!(
        path = %path.display(),
        read = report.read,
        inserted = report.inserted,
        skipped = report.skipped,
        duplicates = report.duplicates,
        "Import complete"
    );

    Ok(report)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use swift_core::RecordStore;

    use super::*;
    use crate::DbConfig;

    const HEADER: &str =
        "COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE";

    fn sample() -> String {
        [
            HEADER,
            "PL,BPKOPLPWXXX,BIC11,PKO BANK POLSKI S.A.,PULAWSKA 15,WARSZAWA,Poland,Europe/Warsaw",
            "pl,bpkoplpwwar,BIC11,PKO BANK POLSKI S.A.,MARSZALKOWSKA 1,WARSZAWA,POLAND,Europe/Warsaw",
            "PL,SHORT,BIC11,TOO SHORT BANK,NOWHERE,WARSZAWA,POLAND,Europe/Warsaw",
            "PL,ABCDEFGHIJK,BIC11,MISSING COLUMNS",
            "CL,BCHICLRMXXX,BIC11,BANCO DE CHILE,,SANTIAGO,CHILE,Pacific/Easter",
        ]
        .join("\n")
    }

    #[test]
    fn test_parse_normalizes_and_skips() {
        let parsed = parse_csv(sample().as_bytes()).unwrap();

        assert_eq!(parsed.skipped, 2);
        let codes: Vec<&str> = parsed.records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["BPKOPLPWXXX", "BPKOPLPWWAR", "BCHICLRMXXX"]);

        let hq = &parsed.records[0];
        assert!(hq.is_headquarter);
        assert_eq!(hq.country_name, "POLAND");
        assert_eq!(hq.town_name.as_deref(), Some("WARSZAWA"));

        let branch = &parsed.records[1];
        assert!(!branch.is_headquarter);
        assert_eq!(branch.country_iso2, "PL");

        assert_eq!(parsed.records[2].address, "");
    }

    #[test]
    fn test_parse_header_only() {
        let parsed = parse_csv(HEADER.as_bytes()).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[tokio::test]
    async fn test_import_is_idempotent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample().as_bytes()).unwrap();

        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = import_csv(&db, file.path()).await.unwrap();
        assert_eq!(
            first,
            ImportReport {
                read: 5,
                inserted: 3,
                skipped: 2,
                duplicates: 0,
            }
        );

        let second = import_csv(&db, file.path()).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.duplicates, 3);
        assert_eq!(db.bank_codes().count().await.unwrap(), 3);

        let branches = db
            .bank_codes()
            .get_branches_by_prefix("BPKOPLPWXXX")
            .await
            .unwrap();
        assert_eq!(branches.len(), 1);
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = import_csv(&db, "/nonexistent/swift.csv").await.unwrap_err();
        assert!(matches!(err, DbError::ImportFailed(_)), "{err:?}");
    }
}
