//! Form bodies for the text and URL endpoints.
//!
//! The bundled page posts `FormData` (multipart), while curl and plain HTML
//! forms send `application/x-www-form-urlencoded`; both are accepted.

use std::collections::HashMap;

use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

use crate::errors::AppError;

#[derive(Debug, Default)]
pub struct FormFields(pub HashMap<String, String>);

impl FormFields {
    /// Returns the named field, or an [`AppError::InvalidForm`] when absent.
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.0
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::InvalidForm(format!("missing form field `{name}`")))
    }
}

#[must_use]
pub fn is_multipart(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if is_multipart(content_type) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidForm(e.body_text()))?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart.next_field().await? {
                let Some(name) = field.name().map(ToString::to_string) else {
                    continue;
                };
                let value = field.text().await?;
                // First occurrence wins, like a single-valued form field.
                fields.entry(name).or_insert(value);
            }
            return Ok(Self(fields));
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidForm(e.body_text()))?;
        Ok(Self(fields))
    }
}
