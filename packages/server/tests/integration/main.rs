mod common;
mod registration;
mod uploads;
