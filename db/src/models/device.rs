use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a device brought in for repair, in the `devices` table.
///
/// Each device belongs to exactly one ticket and is created together with
/// it during booking.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub issue_description: String,
    pub serial_number: Option<String>,
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "device_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceType {
    #[sea_orm(string_value = "phone")]
    Phone,

    #[sea_orm(string_value = "laptop")]
    Laptop,

    #[sea_orm(string_value = "tablet")]
    Tablet,

    #[sea_orm(string_value = "desktop")]
    Desktop,

    #[sea_orm(string_value = "watch")]
    Watch,

    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket::Entity")]
    Tickets,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        device_type: DeviceType,
        brand: &str,
        model: &str,
        issue_description: &str,
        serial_number: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            device_type: Set(device_type),
            brand: Set(brand.to_owned()),
            model: Set(model.to_owned()),
            issue_description: Set(issue_description.to_owned()),
            serial_number: Set(serial_number.map(str::to_owned)),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        device_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(device_id).one(db).await
    }
}
