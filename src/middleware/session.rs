use axum::extract::FromRequestParts;
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";

/// The client-generated id scoping a cart. Browsers mint one UUID per
/// browsing session and send it with every cart and checkout request.
#[derive(Debug, Clone, Copy)]
pub struct CartSession(pub Uuid);

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-session-id header".into()))?
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-session-id header".into()))?;

        let id = Uuid::parse_str(raw)
            .map_err(|_| AppError::BadRequest("x-session-id must be a UUID".into()))?;

        Ok(CartSession(id))
    }
}
