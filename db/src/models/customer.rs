use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryFilter};
use serde::Serialize;

use crate::password;

/// Represents a customer in the `customers` table.
///
/// Customers own tickets and receive notifications. `password_hash` is
/// `None` for records created through walk-in bookings; such customers can
/// claim the account later by registering with the same email.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    pub email: String,
    pub phone: String,

    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket::Entity")]
    Tickets,

    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        name: &str,
        email: &str,
        phone: &str,
        password: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            phone: Set(phone.to_owned()),
            password_hash: Set(password.map(password::hash_password)),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        customer_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(customer_id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Reuses the existing record for a known email, otherwise creates one
    /// without credentials. Booking never overwrites an existing customer.
    pub async fn get_or_create<C: ConnectionTrait>(
        db: &C,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Model, DbErr> {
        if let Some(existing) = Self::find_by_email(db, email).await? {
            return Ok(existing);
        }
        Self::create(db, name, email, phone, None).await
    }

    /// Checks email + password, returning the customer only when both match
    /// and the record actually has credentials.
    pub async fn verify_credentials<C: ConnectionTrait>(
        db: &C,
        email: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        if let Some(customer) = Self::find_by_email(db, email).await? {
            if let Some(hash) = &customer.password_hash {
                if password::verify_password(hash, password) {
                    return Ok(Some(customer));
                }
            }
        }
        Ok(None)
    }

    /// Attaches a password to a credential-less record, or fails if the
    /// email is already registered.
    pub async fn set_password<C: ConnectionTrait>(
        db: &C,
        customer_id: i64,
        password: &str,
    ) -> Result<Model, DbErr> {
        let customer = Entity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Customer not found".to_string()))?;

        let mut active_model: ActiveModel = customer.into();
        active_model.password_hash = Set(Some(password::hash_password(password)));
        active_model.update(db).await
    }

    pub async fn touch_last_login<C: ConnectionTrait>(
        db: &C,
        customer_id: i64,
    ) -> Result<Model, DbErr> {
        let customer = Entity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Customer not found".to_string()))?;

        let mut active_model: ActiveModel = customer.into();
        active_model.last_login = Set(Some(Utc::now()));
        active_model.update(db).await
    }
}
