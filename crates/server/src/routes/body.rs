//! Request bodies that arrive either as JSON or as an HTML form.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use super::outcome::ApiOutcome;

/// Extractor that decodes a urlencoded body through [`Form`] and anything
/// else through [`Json`].
///
/// Browsers post forms as `application/x-www-form-urlencoded`; scripts send
/// JSON. Handlers see the same typed value either way.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

/// The body could not be decoded into the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRejection(String);

impl BodyRejection {
    /// Human-readable reason from the underlying decoder.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        ApiOutcome::<()>::bad_request(format!("Invalid request body: {}", self.0)).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|rejection| BodyRejection(rejection.body_text()))
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| Self(value))
                .map_err(|rejection| BodyRejection(rejection.body_text()))
        }
    }
}
