//! RDAP HTTP handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::WhoisRdapError;
use crate::lookup::LookupService;
use crate::rdap::{RdapError, RDAP_MEDIA_TYPE};

/// `GET /domain/{name}`
///
/// Path extraction failures (e.g. a segment that is not UTF-8 once
/// percent-decoded) are answered with an RDAP 400 document.
pub async fn domain_handler(
    State(service): State<LookupService>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Response {
    let name = match path {
        Ok(Path(name)) => name,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected domain path");
            return error_response(&WhoisRdapError::validation(
                "",
                rejection.body_text(),
            ));
        }
    };

    match service.lookup(&name).await {
        Ok(rdap) => rdap_response(StatusCode::OK, &rdap),
        Err(e) => error_response(&e),
    }
}

/// Any other path
pub async fn fallback_handler() -> Response {
    let body = RdapError::new(404, "Not Found", "Unsupported RDAP query");
    rdap_response(StatusCode::NOT_FOUND, &body)
}

/// RDAP error document for a failed lookup
pub fn error_response(err: &WhoisRdapError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    rdap_response(status, &RdapError::from(err))
}

/// Serialize `body` with the RDAP media type and an allow-all CORS header
pub fn rdap_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let (status, json) = match serde_json::to_string(body) {
        Ok(json) => (status, json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize RDAP response");
            let fallback = RdapError::new(
                500,
                "Internal Server Error",
                format!("Failed to serialize response: {}", e),
            );
            match serde_json::to_string(&fallback) {
                Ok(json) => (StatusCode::INTERNAL_SERVER_ERROR, json),
                Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, String::from("{}")),
            }
        }
    };

    (
        status,
        [
            (header::CONTENT_TYPE, RDAP_MEDIA_TYPE),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        json,
    )
        .into_response()
}
