//! POST /ask — answers a filings question for the requested companies.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::Response};

use answer_engine::{AnswerResult, AskRequest};

use crate::{core::app_state::AppState, core::http::response_envelope::ApiResponse};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"query":"What was revenue in 2023?","persona":"Financial Analyst","companies":["UNITEDHEALTH GROUP INC"]}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> Response {
    if body.query.trim().is_empty() {
        return ApiResponse::<AnswerResult>::error("BAD_REQUEST", "query must not be empty")
            .into_response_with_status(StatusCode::BAD_REQUEST);
    }

    // The pipeline downgrades external failures internally, so this is
    // infallible from the handler's point of view.
    let result = state.engine.answer(&body).await;

    ApiResponse::success(result).into_response_with_status(StatusCode::OK)
}
