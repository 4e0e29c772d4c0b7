use axum::extract::{FromRequest, Request};
use validator::Validate;

use crate::error::ApiError;

/// Runs `validator` checks after the inner extractor succeeds.
pub struct Valid<E>(pub E);

impl<S, E> FromRequest<S> for Valid<E>
where
    S: Send + Sync,
    E: FromRequest<S, Rejection = ApiError> + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = E::from_request(req, state).await?;
        inner.validate().map_err(ApiError::from)?;
        Ok(Valid(inner))
    }
}
