use agenda_core::domain::appointment::{AppointmentDraft, DATE_FORMAT};
use chrono::{Days, Local};

/// Tomorrow in form-input format, safely past the create-mode date gate.
pub fn tomorrow() -> String {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap()
        .format(DATE_FORMAT)
        .to_string()
}

/// A draft that passes every create-mode validator.
pub fn valid_draft() -> AppointmentDraft {
    AppointmentDraft {
        client_name: "Juan Pérez".into(),
        phone: "300 123 4567".into(),
        email: "juan@test.com".into(),
        document_type: "CC".into(),
        document_number: "12345678".into(),
        date: tomorrow(),
        time: "09:00 am".into(),
        service: "Avalúos".into(),
        notes: String::new(),
        status: Default::default(),
    }
}
