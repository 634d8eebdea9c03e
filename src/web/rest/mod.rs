pub mod accounts;
pub mod chain;
pub mod transactions;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header::ContentType,
    HttpRequest, HttpResponse, HttpResponseBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Value-shaped failure returned instead of an error status body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new<E: ToString>(error: E) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

fn json_body<T: Serialize>(mut builder: HttpResponseBuilder, value: &T) -> HttpResponse {
    match serde_json::to_string(value) {
        Ok(body) => builder.content_type(ContentType::json()).body(body),
        Err(err) => {
            error!("Unable to serialize response: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub(crate) fn ok_json<T: Serialize>(value: &T) -> HttpResponse {
    json_body(HttpResponse::Ok(), value)
}

pub(crate) fn failure(builder: HttpResponseBuilder, error: impl ToString) -> HttpResponse {
    json_body(builder, &Failure::new(error))
}

/// Malformed JSON bodies get the same failure shape as rejected transactions
pub(crate) fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected {} body: {err}", req.path());
    let response = failure(HttpResponse::BadRequest(), &err);
    InternalError::from_response(err, response).into()
}
