use crate::seed::Seeder;
use db::models::admin::Model;
use sea_orm::DatabaseConnection;
use util::config;

pub struct AdminSeeder;

#[async_trait::async_trait]
impl Seeder for AdminSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let _ = Model::ensure_default(
            db,
            &config::default_admin_username(),
            &config::default_admin_password(),
        )
        .await;

        // Fixed secondary admin for dev logins
        let _ = Model::create(db, "frontdesk", "frontdesk@fixit.local", "password123", "Front Desk").await;
    }
}
