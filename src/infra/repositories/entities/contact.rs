//! SeaORM entity for the contacts table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub friend_id: Uuid,
    pub is_friend: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Contact {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            friend_id: model.friend_id,
            is_friend: model.is_friend,
        }
    }
}
