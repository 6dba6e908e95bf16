use rocket::{http::Status, response::status, serde::json::Json};
use serde_json::Value;

use crate::model::response::{ApiStatus, ResponseWithStatus};
use crate::util::message;

#[catch(404)]
pub fn not_found() -> status::Custom<Json<Value>> {
    let r = ResponseWithStatus::message(ApiStatus::NotFound, message::MESSAGE_NOT_FOUND);
    status::Custom(Status::from_code(r.status_code).unwrap(), Json(r.body))
}

#[catch(500)]
pub fn internal_server_error() -> status::Custom<Json<Value>> {
    let r = ResponseWithStatus::message(
        ApiStatus::InternalServerError,
        message::MESSAGE_UNKNOWN_ERROR,
    );
    status::Custom(Status::from_code(r.status_code).unwrap(), Json(r.body))
}
