//! Slot service - publishing, listing, and deleting time slots.
//!
//! DDD: Orchestrates the slot ledger via Unit of Work; slot deletion
//! cascades over bookings inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, NewTimeSlot, TimeSlot};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Recurring publication request: a daily time window repeated on the
/// selected weekdays for a number of weeks starting today.
#[derive(Debug, Clone)]
pub struct RecurringSlots {
    pub start_time_of_day: NaiveTime,
    pub end_time_of_day: NaiveTime,
    /// Full weekday names ("Monday" .. "Sunday")
    pub weekdays: Vec<String>,
    pub num_weeks: u32,
}

/// Slot ledger operations.
#[async_trait]
pub trait SlotService: Send + Sync {
    /// Publish a single slot. Overlapping slots are accepted.
    async fn publish(
        &self,
        actor: Actor,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<TimeSlot>;

    /// Publish one slot per (week, weekday) pair of the recurring request
    async fn publish_recurring(&self, actor: Actor, request: RecurringSlots)
        -> AppResult<Vec<TimeSlot>>;

    /// List available slots, optionally narrowed by provider and calendar day
    async fn list_available(
        &self,
        provider_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<TimeSlot>>;

    /// The acting provider's own slots
    async fn my_slots(&self, actor: Actor) -> AppResult<Vec<TimeSlot>>;

    /// Delete an owned slot; bookings against it are cancelled first
    async fn delete(&self, actor: Actor, slot_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of SlotService using Unit of Work.
pub struct SlotLedger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SlotLedger<U> {
    /// Create new slot service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn require_provider(actor: Actor) -> AppResult<()> {
    if actor.role.is_provider() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Parse a full weekday name ("Monday" .. "Sunday")
fn parse_weekday(name: &str) -> AppResult<Weekday> {
    match name {
        "Monday" => Ok(Weekday::Mon),
        "Tuesday" => Ok(Weekday::Tue),
        "Wednesday" => Ok(Weekday::Wed),
        "Thursday" => Ok(Weekday::Thu),
        "Friday" => Ok(Weekday::Fri),
        "Saturday" => Ok(Weekday::Sat),
        "Sunday" => Ok(Weekday::Sun),
        other => Err(AppError::validation(format!("Unknown weekday: {}", other))),
    }
}

/// Dates for each (week offset, weekday) pair, starting from `today`.
///
/// The offset to the next matching weekday is computed modulo 7, so a
/// `today` that already matches lands in week 0.
fn recurring_dates(today: NaiveDate, weekdays: &[Weekday], num_weeks: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(weekdays.len() * num_weeks as usize);
    for week in 0..num_weeks {
        for weekday in weekdays {
            let days_until = (weekday.num_days_from_monday() as i64
                - today.weekday().num_days_from_monday() as i64)
                .rem_euclid(7);
            dates.push(today + Duration::days(days_until + i64::from(week) * 7));
        }
    }
    dates
}

#[async_trait]
impl<U: UnitOfWork> SlotService for SlotLedger<U> {
    async fn publish(
        &self,
        actor: Actor,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<TimeSlot> {
        require_provider(actor)?;

        if end_time <= start_time {
            return Err(AppError::validation("End time must be after start time"));
        }

        self.uow
            .slots()
            .create(NewTimeSlot {
                provider_id: actor.id,
                start_time,
                end_time,
            })
            .await
    }

    async fn publish_recurring(
        &self,
        actor: Actor,
        request: RecurringSlots,
    ) -> AppResult<Vec<TimeSlot>> {
        require_provider(actor)?;

        if request.weekdays.is_empty() {
            return Err(AppError::validation("Select at least one weekday"));
        }
        if request.num_weeks == 0 {
            return Err(AppError::validation("Number of weeks must be at least 1"));
        }
        if request.end_time_of_day <= request.start_time_of_day {
            return Err(AppError::validation("End time must be after start time"));
        }

        let weekdays = request
            .weekdays
            .iter()
            .map(|name| parse_weekday(name))
            .collect::<AppResult<Vec<_>>>()?;

        let today = Utc::now().date_naive();
        let slots = recurring_dates(today, &weekdays, request.num_weeks)
            .into_iter()
            .map(|date| NewTimeSlot {
                provider_id: actor.id,
                start_time: date.and_time(request.start_time_of_day).and_utc(),
                end_time: date.and_time(request.end_time_of_day).and_utc(),
            })
            .collect();

        self.uow.slots().create_many(slots).await
    }

    async fn list_available(
        &self,
        provider_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<TimeSlot>> {
        self.uow.slots().list_available(provider_id, date).await
    }

    async fn my_slots(&self, actor: Actor) -> AppResult<Vec<TimeSlot>> {
        require_provider(actor)?;
        self.uow.slots().list_by_provider(actor.id).await
    }

    async fn delete(&self, actor: Actor, slot_id: Uuid) -> AppResult<()> {
        require_provider(actor)?;

        let slot = self
            .uow
            .slots()
            .find_by_id(slot_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if slot.provider_id != actor.id {
            return Err(AppError::Forbidden);
        }

        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let cancelled = ctx.appointments().delete_by_slot(slot_id).await?;
                    if cancelled > 0 {
                        tracing::warn!(
                            slot_id = %slot_id,
                            cancelled,
                            "Deleted slot had bookings; they were removed"
                        );
                    }
                    ctx.slots().delete(slot_id).await
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_weeks_monday_wednesday_yields_four_dates() {
        // A Tuesday
        let today = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let dates = recurring_dates(today, &[Weekday::Mon, Weekday::Wed], 2);

        assert_eq!(dates.len(), 4);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()); // next Monday
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()); // tomorrow
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
        assert!(dates.iter().all(|d| *d >= today));
    }

    #[test]
    fn today_matching_a_selected_weekday_lands_in_week_zero() {
        // A Monday
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let dates = recurring_dates(today, &[Weekday::Mon], 1);

        assert_eq!(dates, vec![today]);
    }

    #[test]
    fn unknown_weekday_name_is_rejected() {
        assert!(parse_weekday("Caturday").is_err());
        assert_eq!(parse_weekday("Sunday").unwrap(), Weekday::Sun);
    }
}
