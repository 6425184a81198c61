//! SeaORM entity for the appointments table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_slot_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub comments: String,
    pub appointment_type: String,
    pub booked_on: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Appointment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            time_slot_id: model.time_slot_id,
            comments: model.comments,
            kind: crate::domain::AppointmentKind::parse(&model.appointment_type)
                .unwrap_or(crate::domain::AppointmentKind::Consultation),
            booked_on: model.booked_on,
        }
    }
}
