//! Request body extractors.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Drop-in replacement for `Json<T>`: malformed JSON and rule violations are
/// both rejected with a 400 [`AppError`].
///
/// ```ignore
/// async fn create(Validated(body): Validated<CreateTaskRequest>) -> AppResult<Json<Task>> {
///     // body is guaranteed to pass validation rules
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Validated(value))
    }
}
