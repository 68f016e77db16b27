//! CSV roster import: parse uploaded rows, validate required fields, hash
//! passwords, and bulk-insert users through the store seam. A bad row is
//! skipped with a reason; only unreadable input aborts the batch.

mod parser;
mod password;

pub use password::{hash_password, verify_password};

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use parser::RosterRow;

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("user store unavailable: {0}")]
    Store(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Applicant,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Applicant => "applicant",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "applicant" | "student" => Some(UserRole::Applicant),
            _ => None,
        }
    }
}

/// An imported platform user. Only the hash of the password is retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub cohort: Option<String>,
}

/// Why a row was left out of the import.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum SkipReason {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("malformed email '{0}'")]
    InvalidEmail(String),
    #[error("duplicate email '{0}' earlier in the file")]
    DuplicateInFile(String),
    #[error("email '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("unrecognized role '{0}'")]
    UnknownRole(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the uploaded file; the header is line 1.
    pub line: u64,
    pub reason: SkipReason,
}

#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported: Vec<User>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportOutcome {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Per-batch insert report from the user store.
#[derive(Debug, Default)]
pub struct BulkInsert {
    pub inserted: Vec<User>,
    /// Emails that were already registered; their rows demote to skipped.
    pub conflicts: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Bulk sink for imported users.
pub trait UserStore: Send + Sync {
    fn insert_many(&self, users: Vec<User>) -> Result<BulkInsert, UserStoreError>;
}

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> String {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("user-{id:06}")
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>, S: UserStore>(
        path: P,
        store: &S,
    ) -> Result<ImportOutcome, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, store)
    }

    pub fn from_reader<R: Read, S: UserStore>(
        reader: R,
        store: &S,
    ) -> Result<ImportOutcome, RosterImportError> {
        let rows = parser::parse_rows(reader)?;

        let mut seen = HashSet::new();
        let mut line_by_email: HashMap<String, u64> = HashMap::new();
        let mut candidates = Vec::new();
        let mut skipped = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let line = index as u64 + 2;
            match build_user(row, &mut seen) {
                Ok(user) => {
                    line_by_email.insert(user.email.to_ascii_lowercase(), line);
                    candidates.push(user);
                }
                Err(reason) => skipped.push(SkippedRow { line, reason }),
            }
        }

        let report = store
            .insert_many(candidates)
            .map_err(|err| RosterImportError::Store(err.to_string()))?;

        for email in report.conflicts {
            let line = line_by_email
                .get(&email.to_ascii_lowercase())
                .copied()
                .unwrap_or(0);
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::AlreadyRegistered(email),
            });
        }
        skipped.sort_by_key(|row| row.line);

        Ok(ImportOutcome {
            imported: report.inserted,
            skipped,
        })
    }
}

fn build_user(row: RosterRow, seen: &mut HashSet<String>) -> Result<User, SkipReason> {
    let email = row.email.ok_or(SkipReason::MissingField("Email"))?;
    if !is_plausible_email(&email) {
        return Err(SkipReason::InvalidEmail(email));
    }
    if !seen.insert(email.to_ascii_lowercase()) {
        return Err(SkipReason::DuplicateInFile(email));
    }

    let first_name = row.first_name.ok_or(SkipReason::MissingField("First Name"))?;
    let last_name = row.last_name.ok_or(SkipReason::MissingField("Last Name"))?;
    let plaintext = row.password.ok_or(SkipReason::MissingField("Password"))?;

    let role = match row.role {
        Some(raw) => UserRole::parse(&raw).ok_or(SkipReason::UnknownRole(raw))?,
        None => UserRole::Applicant,
    };

    Ok(User {
        id: next_user_id(),
        email,
        first_name,
        last_name,
        password_hash: password::hash_password(&plaintext),
        role,
        cohort: row.cohort,
    })
}

fn is_plausible_email(value: &str) -> bool {
    value
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryUsers {
        registered: Mutex<HashSet<String>>,
    }

    impl MemoryUsers {
        fn with_registered(emails: &[&str]) -> Self {
            Self {
                registered: Mutex::new(
                    emails.iter().map(|email| email.to_ascii_lowercase()).collect(),
                ),
            }
        }
    }

    impl UserStore for MemoryUsers {
        fn insert_many(&self, users: Vec<User>) -> Result<BulkInsert, UserStoreError> {
            let mut registered = self.registered.lock().expect("user mutex poisoned");
            let mut report = BulkInsert::default();
            for user in users {
                if registered.insert(user.email.to_ascii_lowercase()) {
                    report.inserted.push(user);
                } else {
                    report.conflicts.push(user.email);
                }
            }
            Ok(report)
        }
    }

    struct OfflineUsers;

    impl UserStore for OfflineUsers {
        fn insert_many(&self, _users: Vec<User>) -> Result<BulkInsert, UserStoreError> {
            Err(UserStoreError::Unavailable("database offline".to_string()))
        }
    }

    const HEADER: &str = "Email,First Name,Last Name,Password,Role,Cohort\n";

    #[test]
    fn imports_valid_rows_and_hashes_passwords() {
        let csv = format!(
            "{HEADER}ada@example.com,Ada,Lovelace,difference-engine,admin,2026-spring\n\
             grace@example.com,Grace,Hopper,nanoseconds,,\n"
        );
        let store = MemoryUsers::default();

        let outcome =
            RosterImporter::from_reader(Cursor::new(csv), &store).expect("import succeeds");

        assert_eq!(outcome.imported_count(), 2);
        assert!(outcome.skipped.is_empty());

        let ada = &outcome.imported[0];
        assert_eq!(ada.role, UserRole::Admin);
        assert_eq!(ada.cohort.as_deref(), Some("2026-spring"));
        assert!(ada.password_hash.starts_with("pbkdf2-sha256$"));
        assert!(!ada.password_hash.contains("difference-engine"));
        assert!(verify_password("difference-engine", &ada.password_hash));
        assert!(!verify_password("wrong", &ada.password_hash));

        let grace = &outcome.imported[1];
        assert_eq!(grace.role, UserRole::Applicant, "role defaults to applicant");
    }

    #[test]
    fn skips_rows_with_reasons_without_aborting() {
        let csv = format!(
            "{HEADER},Missing,Email,pw,,\n\
             not-an-email,Bad,Address,pw,,\n\
             ada@example.com,Ada,Lovelace,pw,,\n\
             ADA@example.com,Ada,Again,pw,,\n\
             eve@example.com,Eve,Unknown,pw,wizard,\n\
             ok@example.com,Oksana,Kyiv,pw,student,\n"
        );
        let store = MemoryUsers::default();

        let outcome =
            RosterImporter::from_reader(Cursor::new(csv), &store).expect("import succeeds");

        assert_eq!(outcome.imported_count(), 2);
        let reasons: Vec<(u64, &SkipReason)> = outcome
            .skipped
            .iter()
            .map(|row| (row.line, &row.reason))
            .collect();
        assert_eq!(outcome.skipped_count(), 4);
        assert_eq!(reasons[0].0, 2);
        assert!(matches!(reasons[0].1, SkipReason::MissingField("Email")));
        assert!(matches!(reasons[1].1, SkipReason::InvalidEmail(_)));
        assert!(matches!(reasons[2].1, SkipReason::DuplicateInFile(_)));
        assert!(matches!(reasons[3].1, SkipReason::UnknownRole(_)));
    }

    #[test]
    fn already_registered_emails_demote_to_skipped() {
        let csv = format!("{HEADER}ada@example.com,Ada,Lovelace,pw,,\n");
        let store = MemoryUsers::with_registered(&["ada@example.com"]);

        let outcome =
            RosterImporter::from_reader(Cursor::new(csv), &store).expect("import succeeds");

        assert_eq!(outcome.imported_count(), 0);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line, 2);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::AlreadyRegistered(_)
        ));
    }

    #[test]
    fn store_outage_aborts_the_import() {
        let csv = format!("{HEADER}ada@example.com,Ada,Lovelace,pw,,\n");

        match RosterImporter::from_reader(Cursor::new(csv), &OfflineUsers) {
            Err(RosterImportError::Store(message)) => assert!(message.contains("offline")),
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let store = MemoryUsers::default();
        match RosterImporter::from_path("./does-not-exist.csv", &store) {
            Err(RosterImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn hashing_is_salted_and_stable_per_salt() {
        let first = hash_password("hunter2");
        let second = hash_password("hunter2");
        assert_ne!(first, second, "salts differ per call");
        assert!(verify_password("hunter2", &first));
        assert!(verify_password("hunter2", &second));

        let fixed = password::hash_with_salt_for_tests("hunter2", b"0123456789abcdef");
        assert_eq!(
            fixed,
            password::hash_with_salt_for_tests("hunter2", b"0123456789abcdef")
        );
    }

    #[test]
    fn verify_rejects_malformed_stored_values() {
        assert!(!verify_password("pw", "not-a-hash"));
        assert!(!verify_password("pw", "pbkdf2-sha256$abc$salt$key"));
        assert!(!verify_password("pw", "pbkdf2-sha256$1000$!!$key"));
    }
}
