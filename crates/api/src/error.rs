// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use bloodlink_domain::DomainError;
use bloodlink_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The credential store could not be read or written.
    Internal {
        /// A description of the failure.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => write!(f, "Authentication failed: {reason}"),
            Self::Unauthorized {
                action,
                required_role,
            } => write!(f, "Unauthorized: '{action}' requires {required_role} role"),
            Self::Internal { reason } => write!(f, "Authentication unavailable: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. The server renders each variant as a flash message or an
/// error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A value that must be unique is already taken.
    Duplicate {
        /// The field whose value collided.
        field: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => write!(f, "Authentication failed: {reason}"),
            Self::Unauthorized {
                action,
                required_role,
            } => write!(f, "Unauthorized: '{action}' requires {required_role} role"),
            Self::DomainRuleViolation { message, .. }
            | Self::Duplicate { message, .. }
            | Self::InvalidInput { message, .. } => write!(f, "{message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::Internal { reason } => Self::Internal { message: reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::InvalidBloodGroup(_) => ApiError::InvalidInput {
            field: String::from("blood_group"),
            message,
        },
        DomainError::InvalidBagStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message,
            }
        }
        DomainError::BloodGroupMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("donor_blood_group"),
            message,
        },
        DomainError::BagNotAvailable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("bag_available"),
            message,
        },
        DomainError::BagExpired { .. } => ApiError::DomainRuleViolation {
            rule: String::from("bag_not_expired"),
            message,
        },
        DomainError::IncompatibleBloodGroup { .. } => ApiError::DomainRuleViolation {
            rule: String::from("blood_group_compatibility"),
            message,
        },
    }
}

/// Human-readable label for a column named in a unique violation.
fn field_label(field: &str) -> &str {
    match field {
        "contact_number" => "contact number",
        "secret_code" => "secret code",
        "session_token" => "session token",
        "name" => "blood bank name",
        other => other,
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint violations become specific user-facing errors; connectivity
/// and query failures become `ApiError::Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::RuleViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::UniqueViolation { field } if field == "bag_id" => {
            ApiError::DomainRuleViolation {
                rule: String::from("bag_available"),
                message: String::from("This bag has already been transfused"),
            }
        }
        PersistenceError::UniqueViolation { field } => {
            let message: String = format!(
                "A record with this {} already exists",
                field_label(&field)
            );
            ApiError::Duplicate { field, message }
        }
        PersistenceError::StaffNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Staff account"),
            message: format!("Staff account with ID {id} does not exist"),
        },
        PersistenceError::DonorNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Donor"),
            message: format!("Donor with ID {id} does not exist"),
        },
        PersistenceError::BankNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Blood bank"),
            message: format!("Blood bank with ID {id} does not exist"),
        },
        PersistenceError::BagNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Bag"),
            message: format!("Bag with ID {id} does not exist"),
        },
        PersistenceError::RecipientNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Recipient"),
            message: format!("Recipient with ID {id} does not exist"),
        },
        PersistenceError::BagReferenced { bag_id } => ApiError::DomainRuleViolation {
            rule: String::from("bag_not_transfused"),
            message: format!("Bag {bag_id} has been transfused and cannot be deleted"),
        },
        PersistenceError::ForeignKeyViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("referential_integrity"),
            message: format!("Referenced record does not exist: {msg}"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
