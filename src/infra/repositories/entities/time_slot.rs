//! SeaORM entity for the time_slots table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "time_slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::TimeSlot {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            provider_id: model.provider_id,
            start_time: model.start_time,
            end_time: model.end_time,
            is_available: model.is_available,
        }
    }
}
