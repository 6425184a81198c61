//! Unit of Work pattern implementation.
//!
//! SOLID (SRP): Manages transaction lifecycle and repository access.
//! DDD: Coordinates operations across multiple aggregates atomically.
//!
//! Every multi-row lifecycle effect (booking, cancellation, rescheduling,
//! slot deletion, friendship transitions, group membership transitions)
//! executes through this layer so the slot-availability invariant is never
//! observable in a half-applied state.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    AccountRepository, AccountStore, AppointmentRepository, AppointmentStore, ContactRepository,
    ContactStore, GroupRepository, GroupStore, MessageRepository, MessageStore, ProfileRepository,
    ProfileStore, SlotRepository, SlotStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the repository level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;

    /// Get profile repository
    fn profiles(&self) -> Arc<dyn ProfileRepository>;

    /// Get slot repository
    fn slots(&self) -> Arc<dyn SlotRepository>;

    /// Get appointment repository
    fn appointments(&self) -> Arc<dyn AppointmentRepository>;

    /// Get contact repository
    fn contacts(&self) -> Arc<dyn ContactRepository>;

    /// Get message repository
    fn messages(&self) -> Arc<dyn MessageRepository>;

    /// Get group repository
    fn groups(&self) -> Arc<dyn GroupRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation for balanced consistency.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a serializable transaction.
    ///
    /// Used where two concurrent writers must not both succeed, e.g. booking
    /// the same slot.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Account writes for this transaction
    pub fn accounts(&self) -> TxAccountRepository<'_> {
        TxAccountRepository::new(self.txn)
    }

    /// Slot writes for this transaction
    pub fn slots(&self) -> TxSlotRepository<'_> {
        TxSlotRepository::new(self.txn)
    }

    /// Appointment writes for this transaction
    pub fn appointments(&self) -> TxAppointmentRepository<'_> {
        TxAppointmentRepository::new(self.txn)
    }

    /// Contact writes for this transaction
    pub fn contacts(&self) -> TxContactRepository<'_> {
        TxContactRepository::new(self.txn)
    }

    /// Group writes for this transaction
    pub fn groups(&self) -> TxGroupRepository<'_> {
        TxGroupRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    account_repo: Arc<AccountStore>,
    profile_repo: Arc<ProfileStore>,
    slot_repo: Arc<SlotStore>,
    appointment_repo: Arc<AppointmentStore>,
    contact_repo: Arc<ContactStore>,
    message_repo: Arc<MessageStore>,
    group_repo: Arc<GroupStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            account_repo: Arc::new(AccountStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db.clone())),
            slot_repo: Arc::new(SlotStore::new(db.clone())),
            appointment_repo: Arc::new(AppointmentStore::new(db.clone())),
            contact_repo: Arc::new(ContactStore::new(db.clone())),
            message_repo: Arc::new(MessageStore::new(db.clone())),
            group_repo: Arc::new(GroupStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // SQLite has a single writer and no SET TRANSACTION; only Postgres
        // gets an explicit isolation level.
        let txn = match self.db.get_database_backend() {
            DbBackend::Postgres => self
                .db
                .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
                .await
                .map_err(AppError::from)?,
            _ => self.db.begin().await.map_err(AppError::from)?,
        };

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }

    fn slots(&self) -> Arc<dyn SlotRepository> {
        self.slot_repo.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointment_repo.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contact_repo.clone()
    }

    fn messages(&self) -> Arc<dyn MessageRepository> {
        self.message_repo.clone()
    }

    fn groups(&self) -> Arc<dyn GroupRepository> {
        self.group_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f)
            .await
    }
}

/// Transaction-aware account repository.
pub struct TxAccountRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAccountRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new account row
    pub async fn create(&self, account: crate::domain::NewAccount) -> AppResult<crate::domain::Account> {
        use super::repositories::entities::account::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let now = chrono::Utc::now();
        let active = ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            username: Set(account.username),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            first_name: Set(account.first_name),
            last_name: Set(account.last_name),
            role: Set(account.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Account::from(model))
    }

    /// Insert a provider's professional metadata
    pub async fn create_provider_detail(
        &self,
        detail: crate::domain::ProviderDetail,
    ) -> AppResult<crate::domain::ProviderDetail> {
        use super::repositories::entities::provider_detail::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let active = ActiveModel {
            account_id: Set(detail.account_id),
            bio: Set(detail.bio),
            phone_number: Set(detail.phone_number),
            license_number: Set(detail.license_number),
            specialty: Set(detail.specialty.as_str().to_string()),
            is_activated: Set(detail.is_activated),
            line1: Set(detail.line1),
            line2: Set(detail.line2),
            city: Set(detail.city),
            state: Set(detail.state),
            pincode: Set(detail.pincode),
            picture: Set(detail.picture),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::ProviderDetail::from(model))
    }

    /// Insert a client's contact profile
    pub async fn create_client_detail(
        &self,
        detail: crate::domain::ClientDetail,
    ) -> AppResult<crate::domain::ClientDetail> {
        use super::repositories::entities::client_detail::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let active = ActiveModel {
            account_id: Set(detail.account_id),
            phone_number: Set(detail.phone_number),
            bio: Set(detail.bio),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::ClientDetail::from(model))
    }
}

/// Transaction-aware slot repository.
pub struct TxSlotRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxSlotRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find slot by ID within the transaction
    pub async fn find_by_id(&self, id: uuid::Uuid) -> AppResult<Option<crate::domain::TimeSlot>> {
        use super::repositories::entities::time_slot::Entity as SlotEntity;
        use sea_orm::EntityTrait;

        let result = SlotEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(crate::domain::TimeSlot::from))
    }

    /// Flip a slot's availability flag
    pub async fn set_available(&self, id: uuid::Uuid, available: bool) -> AppResult<()> {
        use super::repositories::entities::time_slot::{ActiveModel, Entity as SlotEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let slot = SlotEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = slot.into();
        active.is_available = Set(available);
        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    /// Delete a slot row
    pub async fn delete(&self, id: uuid::Uuid) -> AppResult<()> {
        use super::repositories::entities::time_slot::Entity as SlotEntity;
        use sea_orm::EntityTrait;

        let result = SlotEntity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Transaction-aware appointment repository.
pub struct TxAppointmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAppointmentRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find appointment by ID within the transaction
    pub async fn find_by_id(
        &self,
        id: uuid::Uuid,
    ) -> AppResult<Option<crate::domain::Appointment>> {
        use super::repositories::entities::appointment::Entity as AppointmentEntity;
        use sea_orm::EntityTrait;

        let result = AppointmentEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(crate::domain::Appointment::from))
    }

    /// Insert a new booking
    pub async fn create(
        &self,
        user_id: uuid::Uuid,
        time_slot_id: uuid::Uuid,
        kind: crate::domain::AppointmentKind,
        comments: String,
    ) -> AppResult<crate::domain::Appointment> {
        use super::repositories::entities::appointment::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let active = ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            user_id: Set(user_id),
            time_slot_id: Set(time_slot_id),
            comments: Set(comments),
            appointment_type: Set(kind.as_str().to_string()),
            booked_on: Set(chrono::Utc::now()),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Appointment::from(model))
    }

    /// Re-point an appointment at a new slot, updating the editable fields
    pub async fn reassign(
        &self,
        id: uuid::Uuid,
        new_slot_id: uuid::Uuid,
        kind: crate::domain::AppointmentKind,
        comments: String,
    ) -> AppResult<crate::domain::Appointment> {
        use super::repositories::entities::appointment::{ActiveModel, Entity as AppointmentEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let existing = AppointmentEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.time_slot_id = Set(new_slot_id);
        active.appointment_type = Set(kind.as_str().to_string());
        active.comments = Set(comments);

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Appointment::from(model))
    }

    /// Delete a booking
    pub async fn delete(&self, id: uuid::Uuid) -> AppResult<()> {
        use super::repositories::entities::appointment::Entity as AppointmentEntity;
        use sea_orm::EntityTrait;

        let result = AppointmentEntity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Delete every booking against a slot; returns how many were removed
    pub async fn delete_by_slot(&self, time_slot_id: uuid::Uuid) -> AppResult<u64> {
        use super::repositories::entities::appointment::{self, Entity as AppointmentEntity};
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let result = AppointmentEntity::delete_many()
            .filter(appointment::Column::TimeSlotId.eq(time_slot_id))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

/// Transaction-aware contact repository.
pub struct TxContactRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxContactRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find contact edge by ID within the transaction
    pub async fn find_by_id(&self, id: uuid::Uuid) -> AppResult<Option<crate::domain::Contact>> {
        use super::repositories::entities::contact::Entity as ContactEntity;
        use sea_orm::EntityTrait;

        let result = ContactEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(crate::domain::Contact::from))
    }

    /// Mark a pending request as accepted
    pub async fn set_friend(&self, id: uuid::Uuid) -> AppResult<crate::domain::Contact> {
        use super::repositories::entities::contact::{ActiveModel, Entity as ContactEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let existing = ContactEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.is_friend = Set(true);

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Contact::from(model))
    }

    /// Get or create the accepted mirror edge account -> friend
    pub async fn get_or_create_friend_edge(
        &self,
        account_id: uuid::Uuid,
        friend_id: uuid::Uuid,
    ) -> AppResult<crate::domain::Contact> {
        use super::repositories::entities::contact::{self, ActiveModel, Entity as ContactEntity};
        use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

        let existing = ContactEntity::find()
            .filter(contact::Column::AccountId.eq(account_id))
            .filter(contact::Column::FriendId.eq(friend_id))
            .filter(contact::Column::IsFriend.eq(true))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        if let Some(model) = existing {
            return Ok(crate::domain::Contact::from(model));
        }

        let active = ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            account_id: Set(account_id),
            friend_id: Set(friend_id),
            is_friend: Set(true),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Contact::from(model))
    }

    /// Delete the accepted edge account -> friend; returns whether a row went away
    pub async fn delete_friend_edge(
        &self,
        account_id: uuid::Uuid,
        friend_id: uuid::Uuid,
    ) -> AppResult<bool> {
        use super::repositories::entities::contact::{self, Entity as ContactEntity};
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let result = ContactEntity::delete_many()
            .filter(contact::Column::AccountId.eq(account_id))
            .filter(contact::Column::FriendId.eq(friend_id))
            .filter(contact::Column::IsFriend.eq(true))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

/// Transaction-aware group repository.
pub struct TxGroupRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxGroupRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new group
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        created_by: uuid::Uuid,
    ) -> AppResult<crate::domain::Group> {
        use super::repositories::entities::group::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let active = ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            created_by: Set(created_by),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Group::from(model))
    }

    /// Add an account to the member set (idempotent)
    pub async fn add_member(
        &self,
        group_id: uuid::Uuid,
        account_id: uuid::Uuid,
    ) -> AppResult<()> {
        use super::repositories::entities::group_member::{ActiveModel, Entity as MemberEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let existing = MemberEntity::find_by_id((group_id, account_id))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        if existing.is_some() {
            return Ok(());
        }

        let active = ActiveModel {
            group_id: Set(group_id),
            account_id: Set(account_id),
        };
        active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    /// Get or create a pending invitation; returns false if one already existed
    pub async fn get_or_create_pending_invitation(
        &self,
        group_id: uuid::Uuid,
        account_id: uuid::Uuid,
    ) -> AppResult<(crate::domain::Invitation, bool)> {
        use super::repositories::entities::invitation::{self, ActiveModel, Entity as InvitationEntity};
        use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

        // Keyed on (group, user, pending): a declined row does not block
        // a fresh invitation.
        let existing = InvitationEntity::find()
            .filter(invitation::Column::GroupId.eq(group_id))
            .filter(invitation::Column::AccountId.eq(account_id))
            .filter(
                invitation::Column::Status
                    .eq(crate::domain::InvitationStatus::Pending.as_str()),
            )
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        if let Some(model) = existing {
            return Ok((crate::domain::Invitation::from(model), false));
        }

        let active = ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            group_id: Set(group_id),
            account_id: Set(account_id),
            status: Set(crate::domain::InvitationStatus::Pending.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok((crate::domain::Invitation::from(model), true))
    }

    /// Record an invitation response
    pub async fn set_invitation_status(
        &self,
        id: uuid::Uuid,
        status: crate::domain::InvitationStatus,
    ) -> AppResult<crate::domain::Invitation> {
        use super::repositories::entities::invitation::{ActiveModel, Entity as InvitationEntity};
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let existing = InvitationEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(crate::domain::Invitation::from(model))
    }
}
