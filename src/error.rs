use crate::model::response::ApiStatus;
use crate::util::message;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("database error: {0}")]
    Db(sqlx::Error),

    #[error("no snapshot available")]
    NoSnapshot,
}

impl ApiError {
    pub fn status(&self) -> ApiStatus {
        match self {
            ApiError::Transport(_) => ApiStatus::ServiceUnavailable,
            ApiError::Db(_) => ApiStatus::InternalServerError,
            ApiError::NoSnapshot => ApiStatus::BadGateway,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => message::MESSAGE_UPSTREAM_UNREACHABLE,
            ApiError::Db(_) => message::MESSAGE_INTERNAL_SERVER_ERROR,
            ApiError::NoSnapshot => message::MESSAGE_NO_SNAPSHOT,
        }
    }
}

// The data layer reports failures as `rocket::response::Debug<sqlx::Error>`;
// unwrap that back into the service error here.
impl From<rocket::response::Debug<sqlx::Error>> for ApiError {
    fn from(err: rocket::response::Debug<sqlx::Error>) -> Self {
        ApiError::Db(err.0)
    }
}
