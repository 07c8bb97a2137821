//! Error-to-response mapping
//!
//! Every failure crossing a route handler becomes a status code plus a
//! user-visible message; nothing escapes unhandled.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use promoboard_domain::PromoboardError;
use serde::Serialize;
use tracing::{error, warn};

/// Route-boundary error wrapper
#[derive(Debug)]
pub struct AppError(pub PromoboardError);

impl From<PromoboardError> for AppError {
    fn from(err: PromoboardError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PromoboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PromoboardError::Auth(_) => StatusCode::UNAUTHORIZED,
            PromoboardError::NotFound(_) => StatusCode::NOT_FOUND,
            PromoboardError::Network(_) => StatusCode::BAD_GATEWAY,
            PromoboardError::Config(_)
            | PromoboardError::Store(_)
            | PromoboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "request rejected");
        }

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: PromoboardError) -> StatusCode {
        AppError(err).into_response().status()
    }

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(status_for(PromoboardError::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(PromoboardError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(PromoboardError::Auth("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(PromoboardError::Network("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(PromoboardError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
