use common::registration::{Gender, RegistrationRecord};
use serde::Serialize;

use crate::entity::registration;
use crate::error::AppError;

/// Confirmation body returned by the mutating endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Registration successful")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Text fields of the registration form, collected from the multipart body.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub qualification: Option<String>,
    pub gender: Option<String>,
}

/// The same fields with presence established.
#[derive(Debug)]
pub struct RegistrationFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub qualification: String,
    pub gender: Gender,
}

impl RegistrationForm {
    /// Accept a multipart text field by form name. Unknown names are ignored,
    /// matching the original form contract.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "firstName" => self.first_name = Some(value),
            "lastName" => self.last_name = Some(value),
            "email" => self.email = Some(value),
            "contact" => self.contact = Some(value),
            "qualification" => self.qualification = Some(value),
            "gender" => self.gender = Some(value),
            _ => {}
        }
    }

    /// Server-side validation is presence-only; format constraints are the
    /// client's job.
    pub fn into_fields(self) -> Result<RegistrationFields, AppError> {
        let gender = required(self.gender, "gender")?
            .parse::<Gender>()
            .map_err(AppError::Validation)?;
        Ok(RegistrationFields {
            first_name: required(self.first_name, "firstName")?,
            last_name: required(self.last_name, "lastName")?,
            email: required(self.email, "email")?,
            contact: required(self.contact, "contact")?,
            qualification: required(self.qualification, "qualification")?,
            gender,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation(format!(
            "Missing required field: {name}"
        ))),
    }
}

impl From<registration::Model> for RegistrationRecord {
    fn from(m: registration::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            // Stored as validated text; an unreadable value should never
            // reach here, but fall back rather than fail the listing.
            gender: m.gender.parse().unwrap_or(Gender::Other),
            contact: m.contact,
            qualification: m.qualification,
            file: m.file,
            file_size: m.file_size,
            created_at: m.created_at,
        }
    }
}
