//! Appointment repository - booking ledger reads.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::{appointment, time_slot};
use crate::domain::{Appointment, AppointmentView, TimeSlot};
use crate::errors::{AppError, AppResult};

/// Appointment ledger reads. Mutations run through the Unit of Work.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find appointment by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// Find an appointment joined with its slot
    async fn find_view(&self, id: Uuid) -> AppResult<Option<AppointmentView>>;

    /// A user's own bookings, optionally future-dated only
    async fn list_for_user(
        &self,
        user_id: Uuid,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>>;

    /// All bookings against slots a provider owns, optionally future-dated only
    async fn list_for_provider(
        &self,
        provider_id: Uuid,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>>;
}

/// SeaORM-backed implementation of [`AppointmentRepository`]
pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Join appointments with their slots, keeping slot order by start time
    async fn join_slots(
        &self,
        appointments: Vec<appointment::Model>,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>> {
        if appointments.is_empty() {
            return Ok(Vec::new());
        }

        let slot_ids: Vec<Uuid> = appointments.iter().map(|a| a.time_slot_id).collect();
        let slots: HashMap<Uuid, TimeSlot> = time_slot::Entity::find()
            .filter(time_slot::Column::Id.is_in(slot_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, TimeSlot::from(m)))
            .collect();

        let now = Utc::now();
        let mut views: Vec<AppointmentView> = appointments
            .into_iter()
            .filter_map(|model| {
                let slot = slots.get(&model.time_slot_id)?.clone();
                if upcoming_only && slot.start_time < now {
                    return None;
                }
                Some(AppointmentView {
                    appointment: Appointment::from(model),
                    slot,
                })
            })
            .collect();

        views.sort_by_key(|v| v.slot.start_time);
        Ok(views)
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        let result = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Appointment::from))
    }

    async fn find_view(&self, id: Uuid) -> AppResult<Option<AppointmentView>> {
        let Some(model) = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let slot = time_slot::Entity::find_by_id(model.time_slot_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        Ok(Some(AppointmentView {
            appointment: Appointment::from(model),
            slot: TimeSlot::from(slot),
        }))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>> {
        let appointments = appointment::Entity::find()
            .filter(appointment::Column::UserId.eq(user_id))
            .order_by_asc(appointment::Column::BookedOn)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.join_slots(appointments, upcoming_only).await
    }

    async fn list_for_provider(
        &self,
        provider_id: Uuid,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>> {
        let slot_ids: Vec<Uuid> = time_slot::Entity::find()
            .filter(time_slot::Column::ProviderId.eq(provider_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if slot_ids.is_empty() {
            return Ok(Vec::new());
        }

        let appointments = appointment::Entity::find()
            .filter(appointment::Column::TimeSlotId.is_in(slot_ids))
            .order_by_asc(appointment::Column::BookedOn)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.join_slots(appointments, upcoming_only).await
    }
}
