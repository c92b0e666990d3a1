//! Unified error codes for the bookshop back office
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Staff/account errors
//! - 4xxx: Order errors
//! - 5xxx: Book errors
//! - 6xxx: Customer errors
//! - 7xxx: Role errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Staff/Account ====================
    /// Staff member not found
    StaffNotFound = 3001,
    /// Staff member has no linked credential
    CredentialMissing = 3002,
    /// Credential is already linked to another staff member
    CredentialAlreadyLinked = 3003,
    /// Username already exists
    UsernameExists = 3004,
    /// Password too short
    PasswordTooShort = 3005,
    /// Role group is required
    RoleGroupRequired = 3006,
    /// Cannot delete own account
    CannotDeleteSelf = 3007,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been completed
    OrderAlreadyCompleted = 4002,
    /// Order has no books
    OrderEmpty = 4003,
    /// A referenced book is not available for sale
    BookUnavailable = 4004,
    /// The same book appears twice in one order
    DuplicateOrderBook = 4005,

    // ==================== 5xxx: Book ====================
    /// Book not found
    BookNotFound = 5001,
    /// Book is referenced by orders
    BookInOrder = 5002,
    /// Author not found
    AuthorNotFound = 5101,
    /// Author is referenced by books
    AuthorInUse = 5102,

    // ==================== 6xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 6001,
    /// Customer requires at least one name
    CustomerNameRequired = 6002,

    // ==================== 7xxx: Role ====================
    /// Role not found
    RoleNotFound = 7001,
    /// Role name already exists
    RoleNameExists = 7002,
    /// Role is referenced by staff members
    RoleInUse = 7003,
    /// Cannot modify/delete system role
    RoleIsSystem = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Storage is busy; the operation may be retried
    ResourceBusy = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Staff/Account
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::CredentialMissing => "Staff member has no linked credential",
            ErrorCode::CredentialAlreadyLinked => "Credential is already linked to a staff member",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::RoleGroupRequired => "A role group is required",
            ErrorCode::CannotDeleteSelf => "Cannot delete your own account",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyCompleted => "Order has already been completed",
            ErrorCode::OrderEmpty => "Order has no books",
            ErrorCode::BookUnavailable => "Book is not available for sale",
            ErrorCode::DuplicateOrderBook => "The same book cannot appear twice in one order",

            // Book
            ErrorCode::BookNotFound => "Book not found",
            ErrorCode::BookInOrder => "Book is referenced by orders",
            ErrorCode::AuthorNotFound => "Author not found",
            ErrorCode::AuthorInUse => "Author is referenced by books",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerNameRequired => "Customer requires a first or last name",

            // Role
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::RoleNameExists => "Role name already exists",
            ErrorCode::RoleInUse => "Role is referenced by staff members",
            ErrorCode::RoleIsSystem => "Cannot modify or delete a system role",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ResourceBusy => "Storage is busy, please retry",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error for invalid error code conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Staff/Account
            3001 => Ok(ErrorCode::StaffNotFound),
            3002 => Ok(ErrorCode::CredentialMissing),
            3003 => Ok(ErrorCode::CredentialAlreadyLinked),
            3004 => Ok(ErrorCode::UsernameExists),
            3005 => Ok(ErrorCode::PasswordTooShort),
            3006 => Ok(ErrorCode::RoleGroupRequired),
            3007 => Ok(ErrorCode::CannotDeleteSelf),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyCompleted),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::BookUnavailable),
            4005 => Ok(ErrorCode::DuplicateOrderBook),

            // Book
            5001 => Ok(ErrorCode::BookNotFound),
            5002 => Ok(ErrorCode::BookInOrder),
            5101 => Ok(ErrorCode::AuthorNotFound),
            5102 => Ok(ErrorCode::AuthorInUse),

            // Customer
            6001 => Ok(ErrorCode::CustomerNotFound),
            6002 => Ok(ErrorCode::CustomerNameRequired),

            // Role
            7001 => Ok(ErrorCode::RoleNotFound),
            7002 => Ok(ErrorCode::RoleNameExists),
            7003 => Ok(ErrorCode::RoleInUse),
            7004 => Ok(ErrorCode::RoleIsSystem),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ResourceBusy),
            9004 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderEmpty.code(), 4003);
        assert_eq!(ErrorCode::BookUnavailable.code(), 4004);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::PermissionDenied,
            ErrorCode::CredentialMissing,
            ErrorCode::OrderAlreadyCompleted,
            ErrorCode::BookUnavailable,
            ErrorCode::RoleIsSystem,
            ErrorCode::ResourceBusy,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OrderEmpty).unwrap();
        assert_eq!(json, "4003");

        let code: ErrorCode = serde_json::from_str("4004").unwrap();
        assert_eq!(code, ErrorCode::BookUnavailable);
    }
}
