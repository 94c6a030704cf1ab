use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;
use uuid::Uuid;

use crate::{
    config::StoreConfig,
    domain::appointment::{Appointment, NewAppointment},
    errors::StoreError,
};

use super::{AppointmentStore, Result, SlotBackend};

/// Slot name the agency site has always kept its appointments under.
pub const APPOINTMENTS_SLOT: &str = "citas";

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Appointment store that keeps the full list in memory and rewrites the
/// serialized snapshot through its slot backend on every mutation.
pub struct SnapshotStore<B: SlotBackend> {
    backend: B,
    slot: String,
    appointments: Vec<Appointment>,
}

impl<B: SlotBackend> SnapshotStore<B> {
    /// Opens the store against the default slot, deserializing the
    /// existing snapshot. A malformed snapshot is logged and replaced by
    /// an empty list; the next mutation rewrites it.
    pub fn open(backend: B) -> Result<Self> {
        Self::open_slot(backend, APPOINTMENTS_SLOT)
    }

    pub fn open_slot(backend: B, slot: &str) -> Result<Self> {
        let appointments = match backend.read(slot)? {
            None => Vec::new(),
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(list) => list,
                Err(err) => {
                    warn!(slot, error = %err, "discarding malformed appointment snapshot");
                    Vec::new()
                }
            },
        };
        Ok(Self {
            backend,
            slot: slot.to_string(),
            appointments,
        })
    }

    /// Flushes the snapshot and hands the backend back to the caller.
    pub fn close(mut self) -> Result<B> {
        self.persist()?;
        Ok(self.backend)
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.appointments)?;
        self.backend.write(&self.slot, &payload)
    }
}

impl<B: SlotBackend> AppointmentStore for SnapshotStore<B> {
    fn list(&self) -> Vec<&Appointment> {
        self.appointments.iter().collect()
    }

    fn create(&mut self, data: NewAppointment) -> Result<Appointment> {
        let appointment = Appointment::new(data);
        self.appointments.push(appointment.clone());
        self.persist()?;
        Ok(appointment)
    }

    fn update(&mut self, appointment: Appointment) -> Result<()> {
        let existing = self
            .appointments
            .iter_mut()
            .find(|candidate| candidate.id == appointment.id)
            .ok_or(StoreError::NotFound(appointment.id))?;
        *existing = appointment;
        self.persist()
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.appointments.len();
        self.appointments.retain(|candidate| candidate.id != id);
        if self.appointments.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.persist()
    }
}

/// Slot backend that stores each slot as a JSON file under the
/// configured data directory, staging writes through a temporary file.
pub struct FileSlotBackend {
    dir: PathBuf,
}

impl FileSlotBackend {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        ensure_dir(&config.data_dir)?;
        Ok(Self {
            dir: config.data_dir.clone(),
        })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.{SLOT_EXTENSION}"))
    }
}

impl SlotBackend for FileSlotBackend {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<()> {
        let path = self.slot_path(slot);
        let tmp = path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, payload)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// In-memory slot backend, the test double for the durable slot.
#[derive(Debug, Default)]
pub struct MemorySlotBackend {
    slots: HashMap<String, String>,
}

impl MemorySlotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw payload currently held by a slot, for assertions on the wire
    /// format.
    pub fn payload(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    /// Seeds a slot, e.g. with a pre-existing or corrupted snapshot.
    pub fn seed(&mut self, slot: &str, payload: &str) {
        self.slots.insert(slot.to_string(), payload.to_string());
    }
}

impl SlotBackend for MemorySlotBackend {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
