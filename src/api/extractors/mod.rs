//! Custom extractors.

mod upload_form;
mod validated_json;

pub use upload_form::{ImagePart, UploadForm};
pub use validated_json::{format_validation_errors, ValidatedJson};
