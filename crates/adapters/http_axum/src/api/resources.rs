//! JSON REST handlers for a single resource key.
//!
//! Every handler receives the [`ResourceService`] scoped to the key its route
//! was registered for.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use jsonserver_app::ports::{DocumentStore, IdGenerator};
use jsonserver_app::services::resource_service::ResourceService;
use jsonserver_domain::resource::Resource;

use super::payload::Payload;
use crate::error::ApiError;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Resource>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the read, replace and update endpoints.
pub enum GetResponse {
    Ok(Json<Resource>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Resource>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    /// `200` with an empty body.
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

/// `GET /<key>`
pub async fn list<S, G>(
    State(service): State<ResourceService<S, G>>,
) -> Result<ListResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let resources = service.find().await?;
    Ok(ListResponse::Ok(Json(resources)))
}

/// `GET /<key>/{id}`
pub async fn read<S, G>(
    State(service): State<ResourceService<S, G>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let resource = service.find_by_id(&id).await?;
    Ok(GetResponse::Ok(Json(resource)))
}

/// `GET /<key>` for a scalar key: `{ "<key>": <value> }`.
pub async fn read_scalar<S, G>(
    State(service): State<ResourceService<S, G>>,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let resource = service.find_by_id(service.key().name()).await?;
    Ok(GetResponse::Ok(Json(resource)))
}

/// `POST /<key>`
pub async fn create<S, G>(
    State(service): State<ResourceService<S, G>>,
    Payload(resource): Payload,
) -> Result<CreateResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let created = service.create(resource).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /<key>/{id}`
pub async fn replace<S, G>(
    State(service): State<ResourceService<S, G>>,
    Path(id): Path<String>,
    Payload(resource): Payload,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let replaced = service.replace(&id, resource).await?;
    Ok(GetResponse::Ok(Json(replaced)))
}

/// `PATCH /<key>/{id}`
pub async fn update<S, G>(
    State(service): State<ResourceService<S, G>>,
    Path(id): Path<String>,
    Payload(patch): Payload,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let updated = service.update(&id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /<key>/{id}`
pub async fn delete<S, G>(
    State(service): State<ResourceService<S, G>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    service.delete(&id).await?;
    Ok(DeleteResponse::Ok)
}
