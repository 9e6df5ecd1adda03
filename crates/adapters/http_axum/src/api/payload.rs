//! Request body extractor shared by create, replace and update.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};

use jsonserver_domain::error::ValidationError;
use jsonserver_domain::resource::Resource;

use crate::error::ApiError;

/// A request body that decoded to a usable resource.
///
/// The body must be a JSON object that is neither empty nor made of a lone
/// `id` field. The `Content-Type` header is not inspected. Any failure is
/// answered with `400` before the store is touched.
pub struct Payload(pub Resource);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::NotAnObject)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| ValidationError::NotAnObject)?;
        let resource = Resource::try_from(value)?;
        resource.validate_payload()?;
        Ok(Self(resource))
    }
}
