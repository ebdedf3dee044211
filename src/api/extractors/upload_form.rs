//! Multipart upload extractor.
//!
//! Collects the text fields and the single `image` file part of a
//! multipart form, so handlers can build and validate a typed request
//! before anything touches the file store.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};

use crate::errors::{AppError, AppResult};

/// The uploaded image part of a multipart form
pub struct ImagePart {
    /// Content type as declared by the client
    pub content_type: String,
    /// Raw file bytes
    pub data: Bytes,
}

/// Parsed multipart form with text fields and an optional image part
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<ImagePart>,
}

impl UploadForm {
    /// Get a required text field
    pub fn text(&self, name: &str) -> AppResult<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::validation(format!("{} is required", name)))
    }

    /// Get the required image part
    pub fn image(&self) -> AppResult<&ImagePart> {
        self.image
            .as_ref()
            .ok_or_else(|| AppError::validation("image is required"))
    }
}

#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "image" {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                image = Some(ImagePart { content_type, data });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)], image: Option<ImagePart>) -> UploadForm {
        UploadForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image,
        }
    }

    #[test]
    fn text_returns_present_fields_and_rejects_missing_ones() {
        let form = form(&[("title", "Cafe")], None);

        assert_eq!(form.text("title").unwrap(), "Cafe");
        assert!(matches!(
            form.text("address"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn image_is_required() {
        let without = form(&[], None);
        assert!(matches!(without.image(), Err(AppError::Validation(_))));

        let with = form(
            &[],
            Some(ImagePart {
                content_type: "image/png".to_string(),
                data: Bytes::from_static(b"png-bytes"),
            }),
        );
        assert_eq!(with.image().unwrap().content_type, "image/png");
    }
}
