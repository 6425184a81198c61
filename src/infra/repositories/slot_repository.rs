//! Slot repository - provider-published time windows.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::time_slot;
use crate::domain::{NewTimeSlot, TimeSlot};
use crate::errors::{AppError, AppResult};

/// Slot ledger reads and single/batch publication.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Find slot by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimeSlot>>;

    /// Publish a single slot (availability defaults to true)
    async fn create(&self, slot: NewTimeSlot) -> AppResult<TimeSlot>;

    /// Publish a batch of slots, e.g. a recurring series
    async fn create_many(&self, slots: Vec<NewTimeSlot>) -> AppResult<Vec<TimeSlot>>;

    /// List available slots, optionally narrowed by provider and calendar day
    async fn list_available(
        &self,
        provider_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<TimeSlot>>;

    /// List every slot a provider has published
    async fn list_by_provider(&self, provider_id: Uuid) -> AppResult<Vec<TimeSlot>>;
}

/// SeaORM-backed implementation of [`SlotRepository`]
pub struct SlotStore {
    db: DatabaseConnection,
}

impl SlotStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlotRepository for SlotStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimeSlot>> {
        let result = time_slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TimeSlot::from))
    }

    async fn create(&self, slot: NewTimeSlot) -> AppResult<TimeSlot> {
        let active = time_slot::ActiveModel {
            id: Set(Uuid::new_v4()),
            provider_id: Set(slot.provider_id),
            start_time: Set(slot.start_time),
            end_time: Set(slot.end_time),
            is_available: Set(true),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(TimeSlot::from(model))
    }

    async fn create_many(&self, slots: Vec<NewTimeSlot>) -> AppResult<Vec<TimeSlot>> {
        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let created: Vec<TimeSlot> = slots
            .into_iter()
            .map(|slot| TimeSlot {
                id: Uuid::new_v4(),
                provider_id: slot.provider_id,
                start_time: slot.start_time,
                end_time: slot.end_time,
                is_available: true,
            })
            .collect();

        let actives: Vec<time_slot::ActiveModel> = created
            .iter()
            .map(|slot| time_slot::ActiveModel {
                id: Set(slot.id),
                provider_id: Set(slot.provider_id),
                start_time: Set(slot.start_time),
                end_time: Set(slot.end_time),
                is_available: Set(true),
            })
            .collect();

        time_slot::Entity::insert_many(actives)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(created)
    }

    async fn list_available(
        &self,
        provider_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<TimeSlot>> {
        let mut query = time_slot::Entity::find()
            .filter(time_slot::Column::IsAvailable.eq(true))
            .order_by_asc(time_slot::Column::StartTime);

        if let Some(provider_id) = provider_id {
            query = query.filter(time_slot::Column::ProviderId.eq(provider_id));
        }

        if let Some(date) = date {
            // Inclusive start-of-day to end-of-day window
            let start = date.and_time(NaiveTime::MIN).and_utc();
            let end = date
                .checked_add_days(Days::new(1))
                .ok_or_else(|| AppError::validation("Date out of range"))?
                .and_time(NaiveTime::MIN)
                .and_utc();
            query = query
                .filter(time_slot::Column::StartTime.gte(start))
                .filter(time_slot::Column::StartTime.lt(end));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(TimeSlot::from).collect())
    }

    async fn list_by_provider(&self, provider_id: Uuid) -> AppResult<Vec<TimeSlot>> {
        let models = time_slot::Entity::find()
            .filter(time_slot::Column::ProviderId.eq(provider_id))
            .order_by_asc(time_slot::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(TimeSlot::from).collect())
    }
}
