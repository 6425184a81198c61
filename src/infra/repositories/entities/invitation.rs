//! SeaORM entity for the invitations table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    pub account_id: Uuid,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Invitation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            account_id: model.account_id,
            status: crate::domain::InvitationStatus::parse(&model.status)
                .unwrap_or(crate::domain::InvitationStatus::Pending),
            created_at: model.created_at,
        }
    }
}
