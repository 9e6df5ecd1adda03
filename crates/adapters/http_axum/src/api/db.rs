//! `GET /db`: the whole document.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use jsonserver_app::ports::{DocumentStore, IdGenerator};
use jsonserver_domain::document::Document;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the dump endpoint.
pub enum DumpResponse {
    Ok(Json<Document>),
}

impl IntoResponse for DumpResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /db`
pub async fn dump<S, G>(State(state): State<AppState<S, G>>) -> Result<DumpResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let document = state.document_service.dump().await?;
    Ok(DumpResponse::Ok(Json(document)))
}
