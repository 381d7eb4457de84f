use crate::seed::Seeder;
use db::models::customer::Model;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use sea_orm::DatabaseConnection;

pub struct CustomerSeeder;

#[async_trait::async_trait]
impl Seeder for CustomerSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed customer for dev logins
        let _ = Model::create(
            db,
            "Test Customer",
            "customer@example.com",
            "012 345 6789",
            Some("password123"),
        )
        .await;

        // Random customers
        for _ in 0..10 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let phone: String = PhoneNumber().fake();
            let _ = Model::create(db, &name, &email, &phone, Some("password123")).await;
        }
    }
}
