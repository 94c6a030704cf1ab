use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{document::DocumentType, schedule::TimeSlot};

/// Date format used by form input and the persisted `fecha` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A scheduled visit as kept in the snapshot. The serde names preserve
/// the layout the agency site already persists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    #[serde(rename = "cliente")]
    pub client_name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "tipoDocumento")]
    pub document_type: DocumentType,
    #[serde(rename = "numeroDocumento")]
    pub document_number: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora")]
    pub time: TimeSlot,
    #[serde(rename = "servicio")]
    pub service: ServiceKind,
    #[serde(rename = "notas", default)]
    pub notes: String,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Builds a stored record from validated data, assigning identity.
    /// `id` and `created_at` are set here and never change afterwards.
    pub fn new(data: NewAppointment) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: data.client_name,
            phone: data.phone,
            email: data.email,
            document_type: data.document_type,
            document_number: data.document_number,
            date: data.date,
            time: data.time,
            service: data.service,
            notes: data.notes,
            status: data.status,
            created_at: Utc::now(),
        }
    }
}

/// Validated appointment data before the store assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub client_name: String,
    pub phone: String,
    pub email: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub service: ServiceKind,
    pub notes: String,
    pub status: AppointmentStatus,
}

/// Raw form input, one field per control. Values stay as the user typed
/// them until validation converts the draft into a `NewAppointment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub client_name: String,
    pub phone: String,
    pub email: String,
    pub document_type: String,
    pub document_number: String,
    pub date: String,
    pub time: String,
    pub service: String,
    pub notes: String,
    pub status: AppointmentStatus,
}

impl AppointmentDraft {
    /// Prefills a draft from a stored record, for the edit form.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            client_name: appointment.client_name.clone(),
            phone: appointment.phone.clone(),
            email: appointment.email.clone(),
            document_type: appointment.document_type.to_string(),
            document_number: appointment.document_number.clone(),
            date: appointment.date.format(DATE_FORMAT).to_string(),
            time: appointment.time.as_str().to_string(),
            service: appointment.service.to_string(),
            notes: appointment.notes.clone(),
            status: appointment.status,
        }
    }
}

/// Lifecycle state of a visit. Any state may follow any other; the
/// agency staff drives transitions by hand from the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    #[serde(rename = "programada")]
    Scheduled,
    #[serde(rename = "confirmada")]
    Confirmed,
    #[serde(rename = "completada")]
    Completed,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "programada",
            AppointmentStatus::Confirmed => "confirmada",
            AppointmentStatus::Completed => "completada",
            AppointmentStatus::Cancelled => "cancelada",
        }
    }

    pub fn parse(value: &str) -> Option<AppointmentStatus> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Services the agency schedules visits for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceKind {
    #[serde(rename = "Avalúos")]
    Appraisal,
    #[serde(rename = "Gestión de Alquileres")]
    RentalManagement,
    #[serde(rename = "Asesoría Legal")]
    LegalAdvisory,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Appraisal,
        ServiceKind::RentalManagement,
        ServiceKind::LegalAdvisory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Appraisal => "Avalúos",
            ServiceKind::RentalManagement => "Gestión de Alquileres",
            ServiceKind::LegalAdvisory => "Asesoría Legal",
        }
    }

    pub fn parse(value: &str) -> Option<ServiceKind> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().to_lowercase() == normalized)
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> NewAppointment {
        NewAppointment {
            client_name: "Juan Pérez".into(),
            phone: "300 123 4567".into(),
            email: "juan@test.com".into(),
            document_type: DocumentType::Cc,
            document_number: "12345678".into(),
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            time: TimeSlot::parse("09:00 am").unwrap(),
            service: ServiceKind::Appraisal,
            notes: String::new(),
            status: AppointmentStatus::default(),
        }
    }

    #[test]
    fn new_assigns_identity_once() {
        let first = Appointment::new(sample_data());
        let second = Appointment::new(sample_data());
        assert_ne!(first.id, second.id);
        assert_eq!(first.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn snapshot_layout_uses_spanish_field_names() {
        let appointment = Appointment::new(sample_data());
        let value = serde_json::to_value(&appointment).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "id",
            "cliente",
            "telefono",
            "email",
            "tipoDocumento",
            "numeroDocumento",
            "fecha",
            "hora",
            "servicio",
            "notas",
            "estado",
            "fechaCreacion",
        ] {
            assert!(object.contains_key(key), "missing key `{key}`");
        }
        assert_eq!(value["estado"], "programada");
        assert_eq!(value["servicio"], "Avalúos");
        assert_eq!(value["hora"], "09:00 am");
    }

    #[test]
    fn draft_prefill_round_trips_display_values() {
        let appointment = Appointment::new(sample_data());
        let draft = AppointmentDraft::from_appointment(&appointment);
        assert_eq!(draft.document_type, "CC");
        assert_eq!(draft.date, "2026-09-01");
        assert_eq!(draft.time, "09:00 am");
        assert_eq!(draft.service, "Avalúos");
        assert_eq!(draft.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn status_parse_accepts_wire_values() {
        assert_eq!(
            AppointmentStatus::parse("confirmada"),
            Some(AppointmentStatus::Confirmed)
        );
        assert_eq!(AppointmentStatus::parse("archivada"), None);
    }

    #[test]
    fn service_parse_matches_accented_labels() {
        assert_eq!(ServiceKind::parse("Avalúos"), Some(ServiceKind::Appraisal));
        assert_eq!(
            ServiceKind::parse("gestión de alquileres"),
            Some(ServiceKind::RentalManagement)
        );
        assert_eq!(ServiceKind::parse("Ventas"), None);
    }
}
