//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use aura_core::{CoordinateError, ReportError, RouteError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid route")]
    Route(#[from] RouteError),
    #[error("invalid weather reports")]
    Reports(#[from] ReportError),
    /// `subject` names the offending input: a station or an arc endpoint.
    #[error("invalid coordinates for {subject}")]
    Coordinates {
        subject: String,
        #[source]
        source: CoordinateError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Route(_) => StatusCode::BAD_REQUEST,
            Self::Reports(_) | Self::Coordinates { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn details(&self) -> String {
        match self {
            Self::Route(err) => err.to_string(),
            Self::Reports(err) => err.to_string(),
            Self::Coordinates { source, .. } => source.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::info!(status = status.as_u16(), error = %self, details = %self.details(), "request rejected");
        (
            status,
            Json(json!({
                "error": self.to_string(),
                "details": self.details(),
            })),
        )
            .into_response()
    }
}
