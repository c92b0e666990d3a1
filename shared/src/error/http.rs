//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Map this error code to an HTTP status code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            // Authentication -> 401
            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid => StatusCode::UNAUTHORIZED,

            // Permission -> 403
            ErrorCode::PermissionDenied
            | ErrorCode::AdminRequired
            | ErrorCode::AccountDisabled => StatusCode::FORBIDDEN,

            // Missing resources -> 404
            ErrorCode::NotFound
            | ErrorCode::StaffNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::BookNotFound
            | ErrorCode::AuthorNotFound
            | ErrorCode::CustomerNotFound
            | ErrorCode::RoleNotFound => StatusCode::NOT_FOUND,

            // Conflicting state -> 409
            ErrorCode::AlreadyExists
            | ErrorCode::CredentialAlreadyLinked
            | ErrorCode::UsernameExists
            | ErrorCode::OrderAlreadyCompleted
            | ErrorCode::BookUnavailable
            | ErrorCode::DuplicateOrderBook
            | ErrorCode::RoleNameExists
            | ErrorCode::RoleInUse
            | ErrorCode::BookInOrder
            | ErrorCode::AuthorInUse => StatusCode::CONFLICT,

            // Transient storage contention -> 503
            ErrorCode::ResourceBusy => StatusCode::SERVICE_UNAVAILABLE,

            // Server faults -> 500
            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // Everything else is a client-side validation problem
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::TokenExpired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::PermissionDenied.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::BookUnavailable.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::ResourceBusy.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::PasswordTooShort.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
