use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use common::registration::RegistrationRecord;
use common::size::human_size;
use common::storage::{BoxReader, DocumentStore};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::entity::registration;
use crate::error::{AppError, ErrorBody, FailureBody};
use crate::models::registration::{MessageResponse, RegistrationFields, RegistrationForm};
use crate::state::AppState;

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

/// A document accepted alongside the form, already written to the store.
struct StoredDocument {
    reference: String,
    /// Human-readable size; `None` when size computation failed (logged).
    size: Option<String>,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Registrations",
    operation_id = "createRegistration",
    summary = "Create a registration",
    description = "Accepts the registration form as multipart/form-data with an optional `file` \
        part. The document is written to the uploads directory before the record is persisted; \
        the two writes are independent and not atomic.",
    request_body(content_type = "multipart/form-data", description = "Form fields + optional file"),
    responses(
        (status = 200, description = "Registration created", body = MessageResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 500, description = "Upload failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_registration(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let (fields, document) = collect_form(multipart, &*state.documents).await?;

    let (file, file_size) = match document {
        Some(doc) => (Some(doc.reference), doc.size),
        None => (None, None),
    };

    let new_registration = registration::ActiveModel {
        first_name: Set(fields.first_name),
        last_name: Set(fields.last_name),
        email: Set(fields.email),
        contact: Set(fields.contact),
        gender: Set(fields.gender.to_string()),
        qualification: Set(fields.qualification),
        file: Set(file),
        file_size: Set(file_size),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_registration
        .insert(&state.db)
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Json(MessageResponse::new("Registration successful")))
}

#[utoipa::path(
    get,
    path = "/registrations",
    tag = "Registrations",
    operation_id = "listRegistrations",
    summary = "List all registrations",
    description = "Returns every registration in insertion order. No pagination.",
    responses(
        (status = 200, description = "All registrations", body = Vec<RegistrationRecord>),
        (status = 400, description = "Store failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationRecord>>, AppError> {
    let rows = registration::Entity::find()
        .order_by_asc(registration::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Json(rows.into_iter().map(RegistrationRecord::from).collect()))
}

#[utoipa::path(
    put,
    path = "/registrations/{id}",
    tag = "Registrations",
    operation_id = "updateRegistration",
    summary = "Update a registration",
    description = "Replaces the form fields wholesale. The stored document reference and size \
        are only replaced when a new `file` part accompanies the request; the previous document \
        is left on disk either way.",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body(content_type = "multipart/form-data", description = "Form fields + optional file"),
    responses(
        (status = 200, description = "Registration updated", body = MessageResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 404, description = "Registration not found", body = MessageResponse),
        (status = 500, description = "Store failure", body = FailureBody),
    ),
)]
#[instrument(skip(state, multipart), fields(id))]
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let (fields, document) = collect_form(multipart, &*state.documents).await?;

    let existing = find_registration(&state.db, id).await?;
    let mut active: registration::ActiveModel = existing.into();

    active.first_name = Set(fields.first_name);
    active.last_name = Set(fields.last_name);
    active.email = Set(fields.email);
    active.contact = Set(fields.contact);
    active.gender = Set(fields.gender.to_string());
    active.qualification = Set(fields.qualification);

    // Without a new document the previous file/file_size stay untouched.
    if let Some(doc) = document {
        active.file = Set(Some(doc.reference));
        active.file_size = Set(doc.size);
    }

    active
        .update(&state.db)
        .await
        .map_err(|e| AppError::storage("There was an error updating the registration", e))?;

    Ok(Json(MessageResponse::new(
        "Registration updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/registrations/{id}",
    tag = "Registrations",
    operation_id = "deleteRegistration",
    summary = "Delete a registration",
    description = "Removes the record. The stored document, if any, is not garbage-collected.",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration deleted", body = MessageResponse),
        (status = 404, description = "Registration not found", body = MessageResponse),
        (status = 500, description = "Store failure", body = FailureBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    find_registration(&state.db, id).await?;

    registration::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::storage("There was an error deleting the registration", e))?;

    Ok(Json(MessageResponse::new(
        "Registration deleted successfully",
    )))
}

async fn find_registration<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<registration::Model, AppError> {
    registration::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::storage("There was an error loading the registration", e))?
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))
}

/// Drain the multipart body into form fields plus an optionally stored
/// document.
///
/// The document is written to the store as soon as its part is read, so a
/// later validation failure can leave an orphaned file behind. That mirrors
/// the documented best-effort consistency between file and record writes.
async fn collect_form(
    mut multipart: Multipart,
    documents: &dyn DocumentStore,
) -> Result<(RegistrationFields, Option<StoredDocument>), AppError> {
    let mut form = RegistrationForm::default();
    let mut document: Option<StoredDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "file" {
            let file_name = field.file_name().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Upload(format!("Upload read error: {e}")))?;

            // An empty file part (no filename, no bytes) counts as "no file".
            let Some(file_name) = file_name.filter(|f| !f.trim().is_empty()) else {
                continue;
            };

            let reader: BoxReader = Box::new(std::io::Cursor::new(data.to_vec()));
            let reference = documents
                .store(&file_name, reader)
                .await
                .map_err(AppError::from_intake)?;

            let size = match documents.size_of(&reference).await {
                Ok(bytes) => Some(human_size(bytes)),
                Err(e) => {
                    tracing::warn!("Failed to compute size of '{}': {}", reference, e);
                    None
                }
            };

            document = Some(StoredDocument { reference, size });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Upload(format!("Failed to read '{name}': {e}")))?;
            form.set_field(&name, text);
        }
    }

    Ok((form.into_fields()?, document))
}
