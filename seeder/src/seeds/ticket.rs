use crate::seed::Seeder;
use db::models::customer;
use db::models::device::DeviceType;
use db::models::ticket::TicketPriority;
use db::ticket_engine::{self, NewTicket, TicketUpdate};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, EntityTrait};

pub struct TicketSeeder;

#[async_trait::async_trait]
impl Seeder for TicketSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

        let device_types = [
            DeviceType::Phone,
            DeviceType::Laptop,
            DeviceType::Tablet,
            DeviceType::Desktop,
            DeviceType::Watch,
        ];
        let brands = ["Apple", "Samsung", "Lenovo", "Dell", "Garmin"];
        let models = ["Alpha 12", "Pro 15", "Air 3", "Edge 7", "Classic"];
        let issues = [
            "Screen cracked after a drop.",
            "Battery drains within an hour.",
            "Does not power on.",
            "Keyboard keys unresponsive.",
            "Overheats under light load.",
        ];
        let priorities = [
            TicketPriority::Low,
            TicketPriority::Medium,
            TicketPriority::High,
        ];

        let customers = customer::Entity::find()
            .all(db)
            .await
            .expect("Failed to load customers");
        if customers.is_empty() {
            panic!("Seed customers before tickets");
        }

        for _ in 0..30 {
            let owner = customers.choose(&mut rng).unwrap();

            let ticket = ticket_engine::create_ticket(
                db,
                NewTicket {
                    customer_name: owner.name.clone(),
                    customer_email: owner.email.clone(),
                    customer_phone: owner.phone.clone(),
                    device_type: *device_types.choose(&mut rng).unwrap(),
                    device_brand: brands.choose(&mut rng).unwrap().to_string(),
                    device_model: models.choose(&mut rng).unwrap().to_string(),
                    issue_description: issues.choose(&mut rng).unwrap().to_string(),
                    serial_number: None,
                    priority: Some(*priorities.choose(&mut rng).unwrap()),
                    estimated_cost: Some(rng.gen_range(30.0..400.0f64).round()),
                    notes: None,
                },
            )
            .await
            .expect("Failed to create ticket");

            // Walk each ticket a few random legal steps so dashboards and
            // audit trails have realistic data.
            let mut status = ticket.status;
            for _ in 0..rng.gen_range(0..=3) {
                let Some(&next) = status.valid_next().choose(&mut rng) else {
                    break;
                };
                ticket_engine::update_ticket(
                    db,
                    ticket.id,
                    TicketUpdate {
                        status: Some(next),
                        changed_by: Some("admin".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .expect("Failed to update ticket status");
                status = next;
            }
        }
    }
}
