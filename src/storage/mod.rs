pub mod snapshot;

use uuid::Uuid;

use crate::domain::appointment::{Appointment, NewAppointment};
use crate::errors::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Boundary of the appointment collection. The booking wizard and the
/// dashboard services only see this trait, so tests swap in a store
/// backed by an in-memory slot.
pub trait AppointmentStore {
    fn list(&self) -> Vec<&Appointment>;
    /// Persists a new record, assigning its id and creation timestamp.
    fn create(&mut self, data: NewAppointment) -> Result<Appointment>;
    /// Replaces the record with the same id.
    fn update(&mut self, appointment: Appointment) -> Result<()>;
    fn delete(&mut self, id: Uuid) -> Result<()>;
}

/// External key-value collaborator the snapshot is persisted through.
/// One slot holds one serialized payload, rewritten whole on each write.
pub trait SlotBackend {
    fn read(&self, slot: &str) -> Result<Option<String>>;
    fn write(&mut self, slot: &str, payload: &str) -> Result<()>;
}

pub use snapshot::{FileSlotBackend, MemorySlotBackend, SnapshotStore, APPOINTMENTS_SLOT};
