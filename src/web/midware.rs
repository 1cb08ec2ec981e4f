use std::sync::Arc;

use axum::{
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::web::{log, Error, REQUEST_ID_HEADER};

/// Turns a `web::Error` stored in the response extensions into the client facing
/// `{"error": <message>}` JSON response and logs the request.
pub async fn response_mapper(
    req_method: Method,
    uri: Uri,
    headers: HeaderMap,
    resp: Response,
) -> Response {
    let uuid = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(Uuid::new_v4);

    let web_error = resp.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    if let Some(er) = web_error {
        tracing::error!("SERVER ERROR: {er} ID: {uuid}");
    }

    let err_resp = client_status_and_error.as_ref().map(|(status, cl_err)| {
        let client_error_body = json!({ "error": cl_err.to_string() });

        (*status, Json(client_error_body)).into_response()
    });

    let status = client_status_and_error
        .as_ref()
        .map(|(status, _)| *status)
        .unwrap_or(resp.status());
    log::log_request(
        uuid,
        &req_method,
        &uri,
        status,
        web_error,
        client_status_and_error.as_ref().map(|(_, ce)| ce),
    );

    err_resp.unwrap_or(resp)
}
