//! HTTP adapter mapping for domain errors.
//!
//! Keeps [`DomainError`] transport agnostic while letting handlers return it
//! directly. The response carries the request's trace id both as a header
//! and in the JSON body so clients can quote it.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{DomainError, ErrorCode};
use crate::middleware::TraceId;
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

const REDACTED_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    #[serde(flatten)]
    error: &'a DomainError,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &DomainError) -> DomainError {
    if matches!(error.code(), ErrorCode::InternalError) {
        DomainError::internal(REDACTED_MESSAGE)
    } else {
        error.clone()
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                message = self.message(),
                details = ?self.details(),
                trace_id = trace_id.as_deref(),
                "internal error returned to client"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.as_str()));
        }
        let redacted = redact_if_internal(self);
        builder.json(ErrorBody {
            error: &redacted,
            trace_id,
        })
    }
}

impl From<actix_web::Error> for DomainError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn render(error: &DomainError) -> (StatusCode, Option<String>, Value) {
        let response = ResponseError::error_response(error);
        let status = response.status();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .map(|value| value.to_str().expect("ascii header").to_owned());
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let body = serde_json::from_slice(&bytes).expect("error body is JSON");
        (status, header, body)
    }

    #[rstest]
    #[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(DomainError::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: DomainError, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let error = DomainError::internal("database operation failed: get_user_goals")
            .with_details(json!({ "operation": "get_user_goals" }));

        let (status, _, body) = render(&error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "internal_error");
        assert_eq!(body["message"], REDACTED_MESSAGE);
        assert!(body.get("details").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let error = DomainError::service_unavailable("database operation failed: get_user_debts")
            .with_details(json!({ "operation": "get_user_debts", "backend": "tenant" }));

        let (status, header, body) = render(&error).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(header.is_none());
        assert_eq!(body["message"], "database operation failed: get_user_debts");
        assert_eq!(body["details"]["operation"], "get_user_debts");
        assert!(body.get("traceId").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn trace_id_in_scope_is_echoed() {
        let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
        let error = DomainError::not_found("no such goal");

        let (_, header, body) = TraceId::scope(trace_id, render(&error)).await;

        assert_eq!(header.as_deref(), Some(TRACE_ID));
        assert_eq!(body["traceId"], TRACE_ID);
    }

    #[rstest]
    fn actix_errors_become_redacted_internal_errors() {
        let err: DomainError = actix_web::error::ErrorBadRequest("boom").into();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), REDACTED_MESSAGE);
        assert_eq!(err.details(), None);
    }
}
