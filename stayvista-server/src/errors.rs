use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use stayvista_core::{AuthError, DatabaseError, PaymentError};

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The request carries no token, or one that does not verify
    #[error("unauthorized access")]
    Unauthenticated,
    /// The caller is authenticated but lacks the required role
    #[error("unauthorized access")]
    Forbidden,
    #[error("{resource}:{identifier} not found")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
    #[error("{resource} with {field} of value {value} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("Payment failed: {0}")]
    Payment(String),
    #[error("Unknown internal error: {0}")]
    Unknown(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            // Role failures surface as 401 as well, not 403. Clients were
            // built against this.
            Self::Unauthenticated | Self::Forbidden => StatusCode::UNAUTHORIZED,
            Self::NotFound {
                resource: _,
                identifier: _,
            } => StatusCode::NOT_FOUND,
            Self::Conflict {
                resource: _,
                field: _,
                value: _,
            } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };

        (self.as_status_code(), Json(body)).into_response()
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidToken => Self::Unauthenticated,
            AuthError::Forbidden => Self::Forbidden,
            AuthError::Db(e) => e.into(),
            e => Self::Unknown(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ServerError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::NotFound {
                resource,
                identifier,
            } => Self::NotFound {
                resource,
                identifier,
            },
            DatabaseError::Conflict {
                resource,
                field,
                value,
            } => Self::Conflict {
                resource,
                field,
                value,
            },
            e => Self::Unknown(e.to_string()),
        }
    }
}

impl From<PaymentError> for ServerError {
    fn from(value: PaymentError) -> Self {
        Self::Payment(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use stayvista_core::AuthError;

    use super::ServerError;

    #[test]
    fn auth_failures_map_to_401() {
        let unauthenticated: ServerError = AuthError::InvalidToken.into();
        let forbidden: ServerError = AuthError::Forbidden.into();

        assert_eq!(unauthenticated.as_status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.as_status_code(), StatusCode::UNAUTHORIZED);
    }
}
