//! Validated operations on the appointment collection outside the
//! booking wizard: the edit form, row actions, and the queries that feed
//! the dashboard table and calendar.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::appointment::{Appointment, AppointmentDraft, AppointmentStatus};
use crate::errors::StoreError;
use crate::storage::AppointmentStore;
use crate::validation::{validated_data, FieldErrors, ValidationMode};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// One or more fields failed validation; the map carries the
    /// per-field messages for the form to display.
    #[error("corrige los campos marcados")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct AppointmentService;

impl AppointmentService {
    /// Validates a draft with the creation rules and stores it.
    pub fn create(
        store: &mut dyn AppointmentStore,
        draft: &AppointmentDraft,
    ) -> ServiceResult<Appointment> {
        let data = validated_data(draft, ValidationMode::Create).map_err(ServiceError::Invalid)?;
        Ok(store.create(data)?)
    }

    /// Edit-form flow: same field set as creation, but past dates are
    /// accepted, times must come from the fixed grid, and the email
    /// check is the strict variant. The stored creation timestamp is
    /// preserved. Storage failures pass through so the form can offer a
    /// retry with the raw error text.
    pub fn edit(
        store: &mut dyn AppointmentStore,
        id: Uuid,
        draft: &AppointmentDraft,
    ) -> ServiceResult<Appointment> {
        let data = validated_data(draft, ValidationMode::Edit).map_err(ServiceError::Invalid)?;
        let created_at = Self::find(store, id)?.created_at;
        let updated = Appointment {
            id,
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
            created_at,
        };
        store.update(updated.clone())?;
        Ok(updated)
    }

    /// Direct status change from a table row. Transitions are
    /// unconstrained; staff may move a visit to any state.
    pub fn set_status(
        store: &mut dyn AppointmentStore,
        id: Uuid,
        status: AppointmentStatus,
    ) -> ServiceResult<Appointment> {
        let mut appointment = Self::find(store, id)?;
        appointment.status = status;
        store.update(appointment.clone())?;
        Ok(appointment)
    }

    pub fn remove(store: &mut dyn AppointmentStore, id: Uuid) -> ServiceResult<()> {
        Ok(store.delete(id)?)
    }

    /// All appointments ordered the way the dashboard lists them: by
    /// date, then slot, then creation order.
    pub fn list(store: &dyn AppointmentStore) -> Vec<Appointment> {
        let mut items: Vec<Appointment> = store.list().into_iter().cloned().collect();
        items.sort_by_key(|item| (item.date, item.time.half_hour_index(), item.created_at));
        items
    }

    /// A single day's visits, for the calendar view.
    pub fn on_date(store: &dyn AppointmentStore, date: NaiveDate) -> Vec<Appointment> {
        Self::list(store)
            .into_iter()
            .filter(|item| item.date == date)
            .collect()
    }

    pub fn with_status(store: &dyn AppointmentStore, status: AppointmentStatus) -> Vec<Appointment> {
        Self::list(store)
            .into_iter()
            .filter(|item| item.status == status)
            .collect()
    }

    fn find(store: &dyn AppointmentStore, id: Uuid) -> ServiceResult<Appointment> {
        store
            .list()
            .into_iter()
            .find(|candidate| candidate.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::Store(StoreError::NotFound(id)))
    }
}
