//! SeaORM entity for the provider_details table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "provider_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub phone_number: String,
    pub license_number: String,
    pub specialty: String,
    pub is_activated: bool,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub picture: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::ProviderDetail {
    fn from(model: Model) -> Self {
        Self {
            account_id: model.account_id,
            bio: model.bio,
            phone_number: model.phone_number,
            license_number: model.license_number,
            // Unknown identifiers cannot be written through the API
            specialty: crate::domain::Specialty::parse(&model.specialty)
                .unwrap_or(crate::domain::Specialty::Counseling),
            is_activated: model.is_activated,
            line1: model.line1,
            line2: model.line2,
            city: model.city,
            state: model.state,
            pincode: model.pincode,
            picture: model.picture,
        }
    }
}
