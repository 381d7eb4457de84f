use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::password;

/// Represents a staff account in the `admins` table.
///
/// Admins triage tickets and act as the `changed_by` actor on status
/// changes. They are unrelated to customers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub username: String,
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        username: &str,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password::hash_password(password)),
            full_name: Set(full_name.to_owned()),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        admin_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(admin_id).one(db).await
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn verify_credentials<C: ConnectionTrait>(
        db: &C,
        username: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        if let Some(admin) = Self::find_by_username(db, username).await? {
            if password::verify_password(&admin.password_hash, password) {
                return Ok(Some(admin));
            }
        }
        Ok(None)
    }

    /// Idempotent bootstrap: inserts the default admin account only while
    /// the table is empty. Run once at process startup, never per request.
    pub async fn ensure_default<C: ConnectionTrait>(
        db: &C,
        username: &str,
        password: &str,
    ) -> Result<(), DbErr> {
        if Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        tracing::info!(username, "admins table empty; creating default admin");
        Self::create(db, username, "admin@fixit.local", password, "System Administrator").await?;
        Ok(())
    }

    pub async fn touch_last_login<C: ConnectionTrait>(
        db: &C,
        admin_id: i64,
    ) -> Result<Model, DbErr> {
        let admin = Entity::find_by_id(admin_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Admin not found".to_string()))?;

        let mut active_model: ActiveModel = admin.into();
        active_model.last_login = Set(Some(Utc::now()));
        active_model.update(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::test_utils::setup_test_db;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn ensure_default_is_idempotent() {
        let db = setup_test_db().await;

        Model::ensure_default(&db, "admin", "admin123").await.unwrap();
        Model::ensure_default(&db, "admin", "admin123").await.unwrap();

        let count = super::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn ensure_default_respects_existing_accounts() {
        let db = setup_test_db().await;

        Model::create(&db, "ops", "ops@fixit.local", "pw", "Ops Person")
            .await
            .unwrap();
        Model::ensure_default(&db, "admin", "admin123").await.unwrap();

        assert!(Model::find_by_username(&db, "admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn verify_credentials_rejects_bad_password() {
        let db = setup_test_db().await;

        Model::create(&db, "admin", "admin@fixit.local", "right-pw", "Admin")
            .await
            .unwrap();

        assert!(
            Model::verify_credentials(&db, "admin", "right-pw")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            Model::verify_credentials(&db, "admin", "wrong-pw")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            Model::verify_credentials(&db, "ghost", "right-pw")
                .await
                .unwrap()
                .is_none()
        );
    }
}
