use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::template::common::parse_iso_date;
use crate::template::validation::{ValidationError, ValidationErrors};

/// Raw fields collected from the multipart payload, before validation.
#[derive(Debug, Default)]
pub struct ProcessForm {
    pub template: Option<Vec<u8>>,
    pub template_filename: Option<String>,
    pub company_name: Option<String>,
    pub date: Option<String>,
    pub logo: Option<Vec<u8>>,
}

/// A fully validated processing request.
#[derive(Debug)]
pub struct ProcessRequest {
    pub template: Vec<u8>,
    pub company_name: String,
    pub date: NaiveDate,
    pub logo: Option<Vec<u8>>,
}

impl ProcessForm {
    /// Validate all fields and convert into a typed request.
    ///
    /// Every problem is reported in one combined message so the caller can
    /// correct the whole form at once. Nothing is processed on failure.
    pub fn into_request(self) -> Result<ProcessRequest, String> {
        let mut errors = ValidationErrors::new();

        let template = match self.template {
            Some(bytes) if !bytes.is_empty() => {
                if let Some(name) = &self.template_filename {
                    if !name.to_ascii_lowercase().ends_with(".pptx") {
                        errors.add(ValidationError::new(
                            "template",
                            "template must be a .pptx file",
                        ));
                    }
                }
                Some(bytes)
            }
            Some(_) => {
                errors.add(ValidationError::new(
                    "template",
                    "uploaded template file is empty",
                ));
                None
            }
            None => {
                errors.add(ValidationError::empty_field("template", "Template file"));
                None
            }
        };

        let company_name = match self.company_name.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                errors.add(ValidationError::empty_field("companyName", "Company name"));
                None
            }
        };

        let date = match self.date.as_deref() {
            None => {
                errors.add(ValidationError::empty_field("date", "Date"));
                None
            }
            Some(raw) => match parse_iso_date(raw) {
                Some(parsed) => Some(parsed),
                None => {
                    errors.add(ValidationError::invalid_date("date", raw.trim()));
                    None
                }
            },
        };

        match (template, company_name, date) {
            (Some(template), Some(company_name), Some(date)) if errors.is_empty() => {
                Ok(ProcessRequest {
                    template,
                    company_name,
                    date,
                    logo: self.logo,
                })
            }
            _ => Err(errors.to_message()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "PPTX Templater API is running")]
    pub message: String,
    #[schema(example = "0.3.1")]
    pub version: String,
}
