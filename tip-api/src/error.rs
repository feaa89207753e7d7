use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tip_cache::CacheError;

const NOT_CACHED: &str = "Could not get the cached data. Probably the program did not have enough time to write the data to the cache.";
const NOT_PARSABLE: &str = "Could not parse the cached data. Probably the program did not have enough time to write the data to the cache.";

/// A failed read of the current tip, rendered as `{error, description}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    description: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    description: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            description: self.description,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        let description = match err {
            CacheError::NotFound => NOT_CACHED,
            CacheError::Corrupt(_) | CacheError::Encode(_) => NOT_PARSABLE,
        };

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: err.to_string(),
            description,
        }
    }
}
