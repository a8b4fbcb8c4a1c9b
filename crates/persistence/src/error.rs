// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloodlink_domain::DomainError;
use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A unique constraint rejected the write.
    UniqueViolation {
        /// The column whose value was already taken.
        field: String,
    },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation(String),
    /// The requested staff account was not found.
    StaffNotFound(i64),
    /// The requested donor was not found.
    DonorNotFound(i64),
    /// The requested bank was not found.
    BankNotFound(i64),
    /// The requested bag was not found.
    BagNotFound(i64),
    /// The requested recipient was not found.
    RecipientNotFound(i64),
    /// A used bag is referenced by its transfusion and cannot be deleted.
    BagReferenced { bag_id: i64 },
    /// A domain rule rejected the write inside a transaction.
    RuleViolation(DomainError),
    /// A stored value could not be converted back to its domain type.
    InvalidStoredValue(String),
    /// Password hashing or verification failed.
    PasswordHashFailed(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => write!(f, "Database connection failed: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UniqueViolation { field } => write!(f, "Duplicate value for {field}"),
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key violation: {msg}"),
            Self::StaffNotFound(id) => write!(f, "Staff account {id} not found"),
            Self::DonorNotFound(id) => write!(f, "Donor {id} not found"),
            Self::BankNotFound(id) => write!(f, "Blood bank {id} not found"),
            Self::BagNotFound(id) => write!(f, "Bag {id} not found"),
            Self::RecipientNotFound(id) => write!(f, "Recipient {id} not found"),
            Self::BagReferenced { bag_id } => {
                write!(f, "Bag {bag_id} has been transfused and cannot be deleted")
            }
            Self::RuleViolation(err) => write!(f, "{err}"),
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::PasswordHashFailed(msg) => write!(f, "Password hashing failed: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    field: unique_violation_field(info.message()),
                }
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::RuleViolation(err)
    }
}

/// Extracts the offending column from a backend unique-violation message.
///
/// `SQLite` reports `UNIQUE constraint failed: donors.contact_number`;
/// `MySQL` reports `Duplicate entry 'x' for key 'donors.contact_number'`.
/// Unique keys are named after their column in both schemas.
pub(crate) fn unique_violation_field(message: &str) -> String {
    let qualified: &str = if let Some(rest) = message.strip_prefix("UNIQUE constraint failed: ") {
        rest.split(',').next().unwrap_or(rest).trim()
    } else if let Some(idx) = message.find("for key '") {
        message[idx + "for key '".len()..].trim_end_matches('\'')
    } else {
        message
    };

    qualified
        .rsplit('.')
        .next()
        .unwrap_or(qualified)
        .to_string()
}
