use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use common::registration::{Gender, RegistrationRecord};

use crate::validate::{self, Field};

/// Current values of the registration form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub qualification: String,
    pub gender: Gender,
    pub file: Option<PathBuf>,
}

impl FormDraft {
    fn from_record(record: &RegistrationRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            contact: record.contact.clone(),
            qualification: record.qualification.clone(),
            gender: record.gender,
            // The file input is always cleared when editing starts; the
            // stored document is kept unless a new one is chosen.
            file: None,
        }
    }
}

/// What the form submits to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Creating,
    Editing(i32),
}

/// Where the UI is in the request lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// A request is in flight; no further submission should start.
    Submitting,
    Error(String),
}

/// The whole client UI state as one immutable value. Every change goes
/// through [`reduce`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub mode: Mode,
    pub phase: Phase,
    pub draft: FormDraft,
    pub errors: BTreeMap<Field, String>,
    pub rows: Vec<RegistrationRecord>,
    pub selected: BTreeSet<i32>,
}

/// Discrete UI transitions.
#[derive(Clone, Debug)]
pub enum Action {
    /// A text field of the form changed.
    FieldChanged(Field, String),
    /// A file was chosen (or cleared) in the form.
    FileChosen(Option<PathBuf>),
    /// Begin editing the row with this id; pre-populates the draft.
    EditStart(i32),
    /// Toggle row selection for bulk delete.
    SelectToggle(i32),
    /// Validate the draft and, if clean, enter the submitting phase.
    Submit,
    /// The create/update request succeeded; reset the form.
    SubmitSuccess,
    /// The create/update request failed.
    SubmitFailure(String),
    /// A fresh list fetch completed.
    ListLoaded(Vec<RegistrationRecord>),
    /// Bulk delete settled; `deleted` ids were acknowledged by the server,
    /// `failed` ids were not.
    DeleteSettled {
        deleted: Vec<i32>,
        failed: Vec<(i32, String)>,
    },
}

/// Apply one action to the state, producing the next state.
pub fn reduce(mut state: UiState, action: Action) -> UiState {
    match action {
        Action::FieldChanged(field, value) => {
            match field {
                Field::FirstName => state.draft.first_name = value,
                Field::LastName => state.draft.last_name = value,
                Field::Email => state.draft.email = value,
                Field::Contact => state.draft.contact = value,
                Field::Qualification => state.draft.qualification = value,
                Field::Gender => match value.parse::<Gender>() {
                    Ok(gender) => {
                        state.draft.gender = gender;
                        state.errors.remove(&Field::Gender);
                    }
                    Err(msg) => {
                        state.errors.insert(Field::Gender, msg);
                    }
                },
                Field::File => {} // files arrive via FileChosen
            }
            state
        }
        Action::FileChosen(path) => {
            state.draft.file = path;
            state
        }
        Action::EditStart(id) => {
            if let Some(record) = state.rows.iter().find(|r| r.id == id) {
                state.draft = FormDraft::from_record(record);
                state.mode = Mode::Editing(id);
                state.errors.clear();
                state.phase = Phase::Idle;
            }
            state
        }
        Action::SelectToggle(id) => {
            if !state.selected.remove(&id) {
                state.selected.insert(id);
            }
            state
        }
        Action::Submit => {
            let editing = matches!(state.mode, Mode::Editing(_));
            let mut errors = validate::validate(&state.draft, editing);
            // A gender parse failure is recorded at change time; the draft
            // still holds the previous value, so re-validation can't see it.
            if let Some(msg) = state.errors.get(&Field::Gender) {
                errors.insert(Field::Gender, msg.clone());
            }
            if errors.is_empty() {
                state.errors.clear();
                state.phase = Phase::Submitting;
            } else {
                state.errors = errors;
                state.phase = Phase::Idle;
            }
            state
        }
        Action::SubmitSuccess => {
            state.draft = FormDraft::default();
            state.mode = Mode::Creating;
            state.errors.clear();
            state.phase = Phase::Idle;
            state
        }
        Action::SubmitFailure(message) => {
            state.phase = Phase::Error(message);
            state
        }
        Action::ListLoaded(rows) => {
            let ids: BTreeSet<i32> = rows.iter().map(|r| r.id).collect();
            state.selected.retain(|id| ids.contains(id));
            state.rows = rows;
            state.phase = Phase::Idle;
            state
        }
        Action::DeleteSettled { deleted, failed } => {
            state.rows.retain(|r| !deleted.contains(&r.id));
            for id in &deleted {
                state.selected.remove(id);
            }
            state.phase = if failed.is_empty() {
                Phase::Idle
            } else {
                let ids: Vec<String> = failed.iter().map(|(id, _)| id.to_string()).collect();
                Phase::Error(format!("Failed to delete: {}", ids.join(", ")))
            };
            state
        }
    }
}
