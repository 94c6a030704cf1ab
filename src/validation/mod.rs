//! Field validators shared by every booking entry point.
//!
//! Each validator is a pure predicate over raw form input. The same
//! functions back per-field feedback, step gating, and the final submit
//! gate, so no call site carries its own copy of a rule.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::appointment::{AppointmentDraft, NewAppointment, ServiceKind, DATE_FORMAT};
use crate::domain::document::DocumentType;
use crate::domain::schedule::{self, TimeSlot, CLOSING_HOUR, OPENING_HOUR};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñÜü ]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+?57)?3[0-9]{9}$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").unwrap());

/// Form fields addressable by a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    ClientName,
    Phone,
    Email,
    DocumentType,
    DocumentNumber,
    Date,
    Time,
    Service,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::ClientName,
        Field::Phone,
        Field::Email,
        Field::DocumentType,
        Field::DocumentNumber,
        Field::Date,
        Field::Time,
        Field::Service,
    ];

    /// Snapshot-layout key the UI uses to anchor the message.
    pub fn key(self) -> &'static str {
        match self {
            Field::ClientName => "cliente",
            Field::Phone => "telefono",
            Field::Email => "email",
            Field::DocumentType => "tipoDocumento",
            Field::DocumentNumber => "numeroDocumento",
            Field::Date => "fecha",
            Field::Time => "hora",
            Field::Service => "servicio",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub type FieldResult = Result<(), ValidationError>;

/// Per-field failure messages, keyed for display next to each control.
pub type FieldErrors = BTreeMap<Field, String>;

/// Rule set in effect: the creation wizard gates harder on date and
/// time, while the edit form is stricter about email shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Edit,
}

pub fn validate_client_name(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("El nombre es obligatorio"));
    }
    let length = trimmed.chars().count();
    if !(2..=100).contains(&length) {
        return Err(ValidationError::new(
            "El nombre debe tener entre 2 y 100 caracteres",
        ));
    }
    if !NAME_PATTERN.is_match(trimmed) {
        return Err(ValidationError::new(
            "El nombre solo puede contener letras y espacios",
        ));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new("El teléfono es obligatorio"));
    }
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if !PHONE_PATTERN.is_match(&stripped) {
        return Err(ValidationError::new(
            "Ingrese un celular colombiano válido: 10 dígitos iniciando en 3",
        ));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("El email es obligatorio"));
    }
    if trimmed.chars().count() > 254 {
        return Err(ValidationError::new("El email supera los 254 caracteres"));
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(ValidationError::new("Ingrese un email válido"));
    }
    Ok(())
}

/// Edit-form email rules: everything `validate_email` checks, plus
/// rejection of repeated `@`, trailing dots, and duplicated domain
/// labels (`example.com.com`, `example.comcom`).
pub fn validate_email_strict(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("El email es obligatorio"));
    }
    if trimmed.matches('@').count() > 1 {
        return Err(ValidationError::new("El email solo puede contener un @"));
    }
    if trimmed.ends_with('.') {
        return Err(ValidationError::new("El email no puede terminar en punto"));
    }
    validate_email(trimmed)?;
    let domain = trimmed.split('@').nth(1).unwrap_or_default();
    if has_duplicated_label(domain) {
        return Err(ValidationError::new(
            "El dominio del email contiene segmentos repetidos",
        ));
    }
    Ok(())
}

pub fn validate_document_type(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Seleccione un tipo de documento"));
    }
    if DocumentType::parse(trimmed).is_none() {
        return Err(ValidationError::new("Tipo de documento no válido"));
    }
    Ok(())
}

/// Number rules depend on the sibling document-type field; both callers
/// re-run this whenever either of the two changes.
pub fn validate_document_number(value: &str, document_type: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new("El número de documento es obligatorio"));
    }
    let Some(doc_type) = DocumentType::parse(document_type) else {
        return Err(ValidationError::new(
            "Seleccione primero un tipo de documento válido",
        ));
    };
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .collect();
    match doc_type {
        DocumentType::Cc => digits_between(
            &stripped,
            8,
            10,
            "La cédula debe tener entre 8 y 10 dígitos",
        ),
        DocumentType::Ce => digits_between(
            &stripped,
            6,
            10,
            "La cédula de extranjería debe tener entre 6 y 10 dígitos",
        ),
        DocumentType::Nit => {
            digits_between(&stripped, 8, 10, "El NIT debe tener entre 8 y 10 dígitos")
        }
        DocumentType::Pasaporte => alphanumeric_between(
            &stripped,
            6,
            20,
            "El pasaporte debe tener entre 6 y 20 caracteres alfanuméricos",
        ),
        DocumentType::Ti => digits_between(
            &stripped,
            10,
            11,
            "La tarjeta de identidad debe tener entre 10 y 11 dígitos",
        ),
    }
}

pub fn validate_date(value: &str, mode: ValidationMode) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Seleccione una fecha"));
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::new("Fecha no válida (use AAAA-MM-DD)"))?;
    if mode == ValidationMode::Create && date < Local::now().date_naive() {
        return Err(ValidationError::new("La fecha no puede ser anterior a hoy"));
    }
    Ok(())
}

pub fn validate_time(value: &str, mode: ValidationMode) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Seleccione una hora"));
    }
    match mode {
        ValidationMode::Create => {
            let Some((_, minute)) = schedule::parse_12h(trimmed) else {
                return Err(ValidationError::new("Hora no válida (use hh:mm am/pm)"));
            };
            if minute % 30 != 0 {
                return Err(ValidationError::new(
                    "Las citas se agendan en intervalos de 30 minutos",
                ));
            }
            let decimal = schedule::decimal_hour(trimmed).unwrap_or_default();
            if !(OPENING_HOUR..=CLOSING_HOUR).contains(&decimal) {
                return Err(ValidationError::new(
                    "El horario de atención es de 08:00 am a 06:00 pm",
                ));
            }
            Ok(())
        }
        ValidationMode::Edit => {
            let known = TimeSlot::parse(trimmed)
                .map(|slot| schedule::all_slots().contains(&slot))
                .unwrap_or(false);
            if known {
                Ok(())
            } else {
                Err(ValidationError::new("Seleccione una hora disponible"))
            }
        }
    }
}

pub fn validate_service(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Seleccione un servicio"));
    }
    if ServiceKind::parse(trimmed).is_none() {
        return Err(ValidationError::new("Servicio no válido"));
    }
    Ok(())
}

/// Runs the validator owning `field` against the draft's current value.
pub fn validate_field(field: Field, draft: &AppointmentDraft, mode: ValidationMode) -> FieldResult {
    match field {
        Field::ClientName => validate_client_name(&draft.client_name),
        Field::Phone => validate_phone(&draft.phone),
        Field::Email => match mode {
            ValidationMode::Create => validate_email(&draft.email),
            ValidationMode::Edit => validate_email_strict(&draft.email),
        },
        Field::DocumentType => validate_document_type(&draft.document_type),
        Field::DocumentNumber => {
            validate_document_number(&draft.document_number, &draft.document_type)
        }
        Field::Date => validate_date(&draft.date, mode),
        Field::Time => validate_time(&draft.time, mode),
        Field::Service => validate_service(&draft.service),
    }
}

/// Batch-validates the given fields, collecting every failure.
pub fn validate_fields(
    fields: &[Field],
    draft: &AppointmentDraft,
    mode: ValidationMode,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for &field in fields {
        if let Err(err) = validate_field(field, draft, mode) {
            errors.insert(field, err.message);
        }
    }
    errors
}

/// Full-draft gate: validates every field, then converts the raw input
/// into typed appointment data. The parse steps cannot fail once the
/// validators pass, but failures still map back to their field.
pub fn validated_data(
    draft: &AppointmentDraft,
    mode: ValidationMode,
) -> Result<NewAppointment, FieldErrors> {
    let errors = validate_fields(&Field::ALL, draft, mode);
    if !errors.is_empty() {
        return Err(errors);
    }
    let document_type = DocumentType::parse(&draft.document_type)
        .ok_or_else(|| single(Field::DocumentType, "Tipo de documento no válido"))?;
    let service = ServiceKind::parse(&draft.service)
        .ok_or_else(|| single(Field::Service, "Servicio no válido"))?;
    let date = NaiveDate::parse_from_str(draft.date.trim(), DATE_FORMAT)
        .map_err(|_| single(Field::Date, "Fecha no válida (use AAAA-MM-DD)"))?;
    let time = TimeSlot::parse(&draft.time)
        .ok_or_else(|| single(Field::Time, "Seleccione una hora disponible"))?;
    Ok(NewAppointment {
        client_name: draft.client_name.trim().to_string(),
        phone: draft.phone.trim().to_string(),
        email: draft.email.trim().to_string(),
        document_type,
        document_number: draft.document_number.trim().to_string(),
        date,
        time,
        service,
        notes: draft.notes.trim().to_string(),
        status: draft.status,
    })
}

fn single(field: Field, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field, message.to_string());
    errors
}

fn digits_between(value: &str, min: usize, max: usize, message: &str) -> FieldResult {
    let valid = (min..=max).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}

fn alphanumeric_between(value: &str, min: usize, max: usize, message: &str) -> FieldResult {
    let valid =
        (min..=max).contains(&value.len()) && value.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}

fn has_duplicated_label(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels
        .windows(2)
        .any(|pair| !pair[0].is_empty() && pair[0].eq_ignore_ascii_case(pair[1]))
    {
        return true;
    }
    // `comcom`: the final label is the same fragment written twice.
    labels.last().is_some_and(|label| {
        let len = label.len();
        len >= 4 && len % 2 == 0 && {
            let (head, tail) = label.split_at(len / 2);
            head.eq_ignore_ascii_case(tail)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    #[test]
    fn name_accepts_accented_letters() {
        assert!(validate_client_name("Juan Pérez").is_ok());
        assert!(validate_client_name("María Ñáñez").is_ok());
    }

    #[test]
    fn name_rejects_empty_short_long_and_symbols() {
        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name("J").is_err());
        assert!(validate_client_name(&"a".repeat(101)).is_err());
        assert!(validate_client_name("Juan_Perez").is_err());
        assert!(validate_client_name("Juan 2").is_err());
    }

    #[test]
    fn phone_accepts_colombian_mobiles() {
        assert!(validate_phone("3001234567").is_ok());
        assert!(validate_phone("300 123 4567").is_ok());
        assert!(validate_phone("(300) 123-4567").is_ok());
        assert!(validate_phone("+57 300 123 4567").is_ok());
        assert!(validate_phone("57 310 555 0000").is_ok());
    }

    #[test]
    fn phone_rejects_other_shapes() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("6011234567").is_err());
        assert!(validate_phone("30012345678").is_err());
        assert!(validate_phone("+58 300 123 4567").is_err());
    }

    #[test]
    fn email_basic_rules() {
        assert!(validate_email("juan@test.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("juan@test").is_err());
        assert!(validate_email("juan test@test.com").is_err());
        let long_local = "a".repeat(250);
        assert!(validate_email(&format!("{long_local}@test.com")).is_err());
    }

    #[test]
    fn strict_email_rejects_duplicated_domains() {
        assert!(validate_email_strict("juan@test.com").is_ok());
        assert!(validate_email_strict("juan@example.comcom").is_err());
        assert!(validate_email_strict("juan@example.com.com").is_err());
        assert!(validate_email_strict("juan@test.com.").is_err());
        assert!(validate_email_strict("juan@@test.com").is_err());
    }

    #[test]
    fn document_number_rules_follow_type() {
        assert!(validate_document_number("12345678", "CC").is_ok());
        assert!(validate_document_number("12.345.678", "CC").is_ok());
        assert!(validate_document_number("1234567", "CC").is_err());
        assert!(validate_document_number("123456", "CE").is_ok());
        assert!(validate_document_number("12345", "CE").is_err());
        assert!(validate_document_number("900123456", "NIT").is_ok());
        assert!(validate_document_number("AB123456", "PASAPORTE").is_ok());
        assert!(validate_document_number("AB1", "PASAPORTE").is_err());
        assert!(validate_document_number("1234567890", "TI").is_ok());
        assert!(validate_document_number("123456789", "TI").is_err());
    }

    #[test]
    fn document_number_fails_for_unknown_type() {
        assert!(validate_document_number("12345678", "DNI").is_err());
        assert!(validate_document_number("12345678", "").is_err());
    }

    #[test]
    fn date_gate_depends_on_mode() {
        let today = Local::now().date_naive();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        let formatted = yesterday.format(DATE_FORMAT).to_string();
        assert!(validate_date(&formatted, ValidationMode::Create).is_err());
        assert!(validate_date(&formatted, ValidationMode::Edit).is_ok());
        let today_formatted = today.format(DATE_FORMAT).to_string();
        assert!(validate_date(&today_formatted, ValidationMode::Create).is_ok());
        assert!(validate_date("", ValidationMode::Create).is_err());
        assert!(validate_date("mañana", ValidationMode::Edit).is_err());
    }

    #[test]
    fn time_gate_depends_on_mode() {
        assert!(validate_time("09:00 am", ValidationMode::Create).is_ok());
        assert!(validate_time("06:00 pm", ValidationMode::Create).is_ok());
        assert!(validate_time("07:30 am", ValidationMode::Create).is_err());
        assert!(validate_time("09:15 am", ValidationMode::Create).is_err());
        assert!(validate_time("", ValidationMode::Create).is_err());
        assert!(validate_time("09:00 am", ValidationMode::Edit).is_ok());
        // The range check lets 06:00 pm through on create, but the edit
        // form only offers the fixed grid, which ends at 05:30 pm.
        assert!(validate_time("06:00 pm", ValidationMode::Edit).is_err());
    }

    #[test]
    fn service_must_be_enumerated() {
        assert!(validate_service("Avalúos").is_ok());
        assert!(validate_service("Gestión de Alquileres").is_ok());
        assert!(validate_service("").is_err());
        assert!(validate_service("Ventas").is_err());
    }

    #[test]
    fn field_keys_match_the_snapshot_layout() {
        assert_eq!(Field::ClientName.key(), "cliente");
        assert_eq!(Field::DocumentNumber.key(), "numeroDocumento");
        assert_eq!(Field::Date.to_string(), "fecha");
    }

    #[test]
    fn validators_are_idempotent() {
        for value in ["3001234567", "123", ""] {
            assert_eq!(validate_phone(value), validate_phone(value));
        }
        for value in ["juan@test.com", "nope"] {
            assert_eq!(validate_email(value), validate_email(value));
        }
    }

    fn valid_draft() -> AppointmentDraft {
        let tomorrow = Local::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap();
        AppointmentDraft {
            client_name: "Juan Pérez".into(),
            phone: "300 123 4567".into(),
            email: "juan@test.com".into(),
            document_type: "CC".into(),
            document_number: "12345678".into(),
            date: tomorrow.format(DATE_FORMAT).to_string(),
            time: "09:00 am".into(),
            service: "Avalúos".into(),
            notes: String::new(),
            status: Default::default(),
        }
    }

    #[test]
    fn validated_data_converts_a_clean_draft() {
        let data = validated_data(&valid_draft(), ValidationMode::Create).unwrap();
        assert_eq!(data.client_name, "Juan Pérez");
        assert_eq!(data.document_type, DocumentType::Cc);
        assert_eq!(data.service, ServiceKind::Appraisal);
        assert_eq!(data.time.as_str(), "09:00 am");
    }

    #[test]
    fn validated_data_collects_every_failure() {
        let mut draft = valid_draft();
        draft.phone = "123".into();
        draft.email = "nope".into();
        let errors = validated_data(&draft, ValidationMode::Create).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key(&Field::Phone));
        assert!(errors.contains_key(&Field::Email));
    }
}
