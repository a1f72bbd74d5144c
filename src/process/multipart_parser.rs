use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures::StreamExt;
use log::debug;
use sanitize_filename::sanitize;

use crate::process::models::ProcessForm;
use crate::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("Invalid UTF-8 data: {0}")]
    Utf8Error(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Upload exceeds the maximum size of {0} bytes")]
    TooLarge(usize),
}

impl From<MultipartParseError> for HttpResponse {
    fn from(error: MultipartParseError) -> Self {
        match error {
            MultipartParseError::Utf8Error(_)
            | MultipartParseError::FieldError(_)
            | MultipartParseError::TooLarge(_) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!("{}", error)))
            }
            _ => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("{}", error))),
        }
    }
}

pub struct ProcessMultipartParser;

impl ProcessMultipartParser {
    /// Collect the `template`, `companyName`, `date`, and optional `logo`
    /// fields from a multipart payload. Unknown fields are skipped. The
    /// combined payload size is capped at `max_bytes`.
    pub async fn parse(
        mut multipart: Multipart,
        max_bytes: usize,
    ) -> Result<ProcessForm, MultipartParseError> {
        let mut form = ProcessForm::default();
        let mut total: usize = 0;

        while let Some(item) = multipart.next().await {
            let mut field = item.map_err(|e| MultipartParseError::FieldError(e.to_string()))?;
            let content_disposition = field.content_disposition().ok_or_else(|| {
                MultipartParseError::FieldError("Content disposition not found".to_string())
            })?;
            let name = content_disposition
                .get_name()
                .ok_or_else(|| MultipartParseError::FieldError("Field name not found".to_string()))?
                .to_string();
            let maybe_filename = content_disposition.get_filename().map(|f| sanitize(f));

            let mut buffer = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
                total += data.len();
                if total > max_bytes {
                    return Err(MultipartParseError::TooLarge(max_bytes));
                }
                buffer.extend_from_slice(&data);
            }

            match name.as_str() {
                "template" => {
                    debug!(
                        "received template field ({} bytes, filename: {:?})",
                        buffer.len(),
                        maybe_filename
                    );
                    form.template_filename = maybe_filename;
                    form.template = Some(buffer);
                }
                "companyName" => {
                    form.company_name = Some(
                        String::from_utf8(buffer)
                            .map_err(|e| MultipartParseError::Utf8Error(e.to_string()))?,
                    );
                }
                "date" => {
                    form.date = Some(
                        String::from_utf8(buffer)
                            .map_err(|e| MultipartParseError::Utf8Error(e.to_string()))?,
                    );
                }
                "logo" => {
                    if !buffer.is_empty() {
                        debug!("received logo field ({} bytes)", buffer.len());
                        form.logo = Some(buffer);
                    }
                }
                _ => {
                    continue;
                }
            }
        }

        Ok(form)
    }
}
