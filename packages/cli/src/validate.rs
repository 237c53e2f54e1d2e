use std::collections::BTreeMap;
use std::fmt;

use crate::state::FormDraft;

/// Form fields that can carry a validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Contact,
    Qualification,
    Gender,
    File,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Contact => "contact",
            Field::Qualification => "qualification",
            Field::Gender => "gender",
            Field::File => "file",
        };
        f.write_str(name)
    }
}

/// Validate a form draft before submission. `editing` relaxes the file
/// requirement: an update keeps the previously stored document when no new
/// one is chosen.
pub fn validate(draft: &FormDraft, editing: bool) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();

    if draft.first_name.trim().is_empty() {
        errors.insert(Field::FirstName, "First name is required".to_string());
    }
    if draft.last_name.trim().is_empty() {
        errors.insert(Field::LastName, "Last name is required".to_string());
    }
    if draft.qualification.trim().is_empty() {
        errors.insert(Field::Qualification, "Qualification is required".to_string());
    }

    if draft.email.is_empty() {
        errors.insert(Field::Email, "Email is required".to_string());
    } else if !email_is_plausible(&draft.email) {
        errors.insert(Field::Email, "Email is invalid".to_string());
    }

    if draft.contact.is_empty() {
        errors.insert(Field::Contact, "Contact number is required".to_string());
    } else if !contact_is_ten_digits(&draft.contact) {
        errors.insert(
            Field::Contact,
            "Contact number must be 10 digits".to_string(),
        );
    }

    if draft.file.is_none() && !editing {
        errors.insert(Field::File, "File is required".to_string());
    }

    errors
}

/// Loose `text@text.text` shape: something before the `@`, a dot somewhere in
/// the domain with characters on both sides, no whitespace anywhere.
fn email_is_plausible(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn contact_is_ten_digits(contact: &str) -> bool {
    contact.len() == 10 && contact.chars().all(|c| c.is_ascii_digit())
}
