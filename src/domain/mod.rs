pub mod appointment;
pub mod document;
pub mod schedule;

pub use appointment::{
    Appointment, AppointmentDraft, AppointmentStatus, NewAppointment, ServiceKind,
};
pub use document::DocumentType;
pub use schedule::TimeSlot;
