use std::collections::BTreeMap;

use common::registration::RegistrationRecord;
use console::style;

use crate::validate::Field;

/// Render the registration list as an aligned table.
pub fn print_registrations(rows: &[RegistrationRecord]) {
    if rows.is_empty() {
        println!("No registrations yet.");
        return;
    }

    println!(
        "{}",
        style(format!(
            "{:<5} {:<12} {:<12} {:<26} {:<11} {:<20} {:<7} {:<34} {:>10}",
            "ID",
            "First",
            "Last",
            "Email",
            "Contact",
            "Qualification",
            "Gender",
            "File",
            "Size"
        ))
        .bold()
    );

    for row in rows {
        println!(
            "{:<5} {:<12} {:<12} {:<26} {:<11} {:<20} {:<7} {:<34} {:>10}",
            row.id,
            row.first_name,
            row.last_name,
            row.email,
            row.contact,
            row.qualification,
            row.gender,
            row.file.as_deref().unwrap_or("-"),
            row.file_size.as_deref().unwrap_or("-"),
        );
    }
}

/// Print per-field validation errors the way the form shows them inline.
pub fn print_field_errors(errors: &BTreeMap<Field, String>) {
    for (field, message) in errors {
        eprintln!("{} {}: {}", style("✗").red(), field, message);
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn print_failure(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}
