use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub gender: String, // one of "male"/"female"/"other", validated at the model boundary
    pub qualification: String,

    /// Stored document reference (uploads-directory filename).
    pub file: Option<String>,
    /// Human-readable document size, captured at upload time.
    pub file_size: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
