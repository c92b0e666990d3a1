//! Error categories derived from code ranges

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// High-level error category
///
/// Categories are derived from the numeric code range, so every
/// [`ErrorCode`] maps to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0-999)
    General,
    /// Authentication errors (1000-1999)
    Auth,
    /// Permission errors (2000-2999)
    Permission,
    /// Staff and account errors (3000-3999)
    Staff,
    /// Order errors (4000-4999)
    Order,
    /// Book and author errors (5000-5999)
    Book,
    /// Customer errors (6000-6999)
    Customer,
    /// Role errors (7000-7999)
    Role,
    /// System errors (9000-9999)
    System,
}

impl ErrorCategory {
    /// Derive the category from a numeric error code
    pub const fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Staff,
            4000..5000 => Self::Order,
            5000..6000 => Self::Book,
            6000..7000 => Self::Customer,
            7000..8000 => Self::Role,
            _ => Self::System,
        }
    }

    /// Category name as a static string
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Staff => "staff",
            Self::Order => "order",
            Self::Book => "book",
            Self::Customer => "customer",
            Self::Role => "role",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category of this error code
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ranges() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidCredentials.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::PermissionDenied.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::CredentialMissing.category(), ErrorCategory::Staff);
        assert_eq!(ErrorCode::OrderEmpty.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::BookNotFound.category(), ErrorCategory::Book);
        assert_eq!(ErrorCode::CustomerNameRequired.category(), ErrorCategory::Customer);
        assert_eq!(ErrorCode::RoleIsSystem.category(), ErrorCategory::Role);
        assert_eq!(ErrorCode::ResourceBusy.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ErrorCategory::Order.name(), "order");
        assert_eq!(ErrorCategory::System.name(), "system");
    }
}
