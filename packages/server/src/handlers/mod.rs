pub mod registration;
pub mod uploads;
