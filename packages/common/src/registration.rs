use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Applicant gender as collected by the registration form. Defaults to the
/// form's pre-selected option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!(
                "Gender must be one of: male, female, other (got '{other}')"
            )),
        }
    }
}

/// One persisted registration entry as exchanged over the wire.
///
/// `file` is the stored document reference (usable as the `/uploads/{..}`
/// suffix); `file_size` is its human-readable size. Both are absent when no
/// document was uploaded, and `file_size` alone may be absent if size
/// computation failed at upload time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Contact number, exactly 10 digits.
    #[schema(example = "5550001234")]
    pub contact: String,
    pub gender: Gender,
    #[schema(example = "B.Sc. Mathematics")]
    pub qualification: String,
    /// Stored document reference, e.g. `1717000000000-transcript.pdf`.
    pub file: Option<String>,
    /// Human-readable document size, e.g. `12.34 KB`.
    pub file_size: Option<String>,
    pub created_at: DateTime<Utc>,
}
