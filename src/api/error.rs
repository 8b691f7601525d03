use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::blockchain::{MineError, PowError};
use crate::network::InvalidAddress;

/// Errors surfaced to HTTP callers. None of them stop the node.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing values")]
    MissingValues,

    #[error("Error: please supply a valid list of nodes")]
    MissingNodes,

    #[error("invalid request body: {0}")]
    BadJson(String),

    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),

    #[error(transparent)]
    Mine(#[from] MineError),

    #[error("worker pool unavailable")]
    Blocking,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingValues
            | ApiError::MissingNodes
            | ApiError::BadJson(_)
            | ApiError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            ApiError::Mine(MineError::Pow(PowError::Exhausted { .. })) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Mine(MineError::Contended { .. }) => StatusCode::CONFLICT,
            ApiError::Blocking => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::LedgerError;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::MissingValues.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(InvalidAddress("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(MineError::Pow(PowError::Exhausted { attempts: 1 })).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let stale = LedgerError::StaleTip {
            expected: "a".into(),
            actual: "b".into(),
        };
        assert_eq!(
            ApiError::from(MineError::Contended {
                retries: 3,
                last: stale
            })
            .status_code(),
            StatusCode::CONFLICT
        );
    }
}
