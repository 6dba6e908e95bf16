use serde_json::{json, Value};

/// A JSON body paired with the HTTP status it should be served with.
/// Routes unpack this into `status::Custom`.
#[derive(Debug)]
pub struct ResponseWithStatus {
    pub status_code: u16,
    pub body: Value,
}

#[derive(Debug, Clone, Copy)]
pub enum ApiStatus {
    Ok,
    Forbidden,
    NotFound,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
}

impl ApiStatus {
    pub fn code(&self) -> u16 {
        match self {
            ApiStatus::Ok => 200,
            ApiStatus::Forbidden => 403,
            ApiStatus::NotFound => 404,
            ApiStatus::InternalServerError => 500,
            ApiStatus::BadGateway => 502,
            ApiStatus::ServiceUnavailable => 503,
        }
    }
}

impl ResponseWithStatus {
    pub fn ok(body: Value) -> Self {
        ResponseWithStatus {
            status_code: ApiStatus::Ok.code(),
            body,
        }
    }

    pub fn message(status: ApiStatus, message: &str) -> Self {
        ResponseWithStatus {
            status_code: status.code(),
            body: json!({ "message": message }),
        }
    }
}
