//! Appointment service - the booking lifecycle.
//!
//! Book, cancel, and reschedule each execute as one atomic transaction so
//! the invariant "a slot is available iff no appointment references it"
//! holds after every mutation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, Appointment, AppointmentKind, AppointmentView};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Booking request data
#[derive(Debug, Clone)]
pub struct BookAppointment {
    pub slot_id: Uuid,
    pub kind: AppointmentKind,
    pub comments: String,
}

/// Reschedule request data
#[derive(Debug, Clone)]
pub struct RescheduleAppointment {
    pub new_slot_id: Uuid,
    pub kind: AppointmentKind,
    pub comments: String,
}

/// Appointment lifecycle operations.
#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Book an available slot. Providers cannot book.
    async fn book(&self, actor: Actor, request: BookAppointment) -> AppResult<Appointment>;

    /// Cancel a booking as the booking user or the slot's provider
    async fn cancel(&self, actor: Actor, appointment_id: Uuid) -> AppResult<()>;

    /// Re-point a booking at a different available slot
    async fn reschedule(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        request: RescheduleAppointment,
    ) -> AppResult<Appointment>;

    /// A provider sees bookings against their slots; a user their own bookings
    async fn my_appointments(
        &self,
        actor: Actor,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>>;
}

/// Concrete implementation of AppointmentService using Unit of Work.
pub struct AppointmentLedger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AppointmentLedger<U> {
    /// Create new appointment service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load a booking and authorize the actor as the booking user or the
    /// slot's owning provider.
    async fn authorized_view(
        &self,
        actor: Actor,
        appointment_id: Uuid,
    ) -> AppResult<AppointmentView> {
        let view = self
            .uow
            .appointments()
            .find_view(appointment_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if view.appointment.user_id != actor.id && view.slot.provider_id != actor.id {
            return Err(AppError::Forbidden);
        }

        Ok(view)
    }
}

#[async_trait]
impl<U: UnitOfWork> AppointmentService for AppointmentLedger<U> {
    async fn book(&self, actor: Actor, request: BookAppointment) -> AppResult<Appointment> {
        // Providers are turned away rather than allowed to book
        if actor.role.is_provider() {
            return Err(AppError::Forbidden);
        }

        // Fast-path check; the slot is re-validated inside the transaction
        let slot = self
            .uow
            .slots()
            .find_by_id(request.slot_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !slot.is_available {
            return Err(AppError::NotFound);
        }

        let user_id = actor.id;
        self.uow
            .transaction_serializable(|ctx| {
                Box::pin(async move {
                    let slot = ctx
                        .slots()
                        .find_by_id(request.slot_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    // Two concurrent bookings of the same slot: the second
                    // one lands here after the first commits.
                    if !slot.is_available {
                        return Err(AppError::conflict("Slot is no longer available"));
                    }

                    let appointment = ctx
                        .appointments()
                        .create(user_id, slot.id, request.kind, request.comments)
                        .await?;

                    ctx.slots().set_available(slot.id, false).await?;

                    Ok(appointment)
                })
            })
            .await
    }

    async fn cancel(&self, actor: Actor, appointment_id: Uuid) -> AppResult<()> {
        let view = self.authorized_view(actor, appointment_id).await?;

        let slot_id = view.slot.id;
        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    ctx.appointments().delete(appointment_id).await?;
                    ctx.slots().set_available(slot_id, true).await?;
                    Ok(())
                })
            })
            .await
    }

    async fn reschedule(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        request: RescheduleAppointment,
    ) -> AppResult<Appointment> {
        let view = self.authorized_view(actor, appointment_id).await?;

        if request.new_slot_id == view.slot.id {
            return Err(AppError::validation(
                "Choose a slot different from the current one",
            ));
        }

        // The new slot is validated BEFORE the old slot is freed; a failure
        // here leaves the appointment and both slots untouched.
        let new_slot = self
            .uow
            .slots()
            .find_by_id(request.new_slot_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !new_slot.is_available {
            return Err(AppError::NotFound);
        }

        let old_slot_id = view.slot.id;
        self.uow
            .transaction_serializable(|ctx| {
                Box::pin(async move {
                    let new_slot = ctx
                        .slots()
                        .find_by_id(request.new_slot_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if !new_slot.is_available {
                        return Err(AppError::conflict("Slot is no longer available"));
                    }

                    ctx.slots().set_available(old_slot_id, true).await?;
                    let appointment = ctx
                        .appointments()
                        .reassign(appointment_id, new_slot.id, request.kind, request.comments)
                        .await?;
                    ctx.slots().set_available(new_slot.id, false).await?;

                    Ok(appointment)
                })
            })
            .await
    }

    async fn my_appointments(
        &self,
        actor: Actor,
        upcoming_only: bool,
    ) -> AppResult<Vec<AppointmentView>> {
        if actor.role.is_provider() {
            self.uow
                .appointments()
                .list_for_provider(actor.id, upcoming_only)
                .await
        } else {
            self.uow
                .appointments()
                .list_for_user(actor.id, upcoming_only)
                .await
        }
    }
}
