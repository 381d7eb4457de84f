use crate::seed::{Seeder, run_seeder};
use crate::seeds::{admin::AdminSeeder, customer::CustomerSeeder, ticket::TicketSeeder};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(AdminSeeder) as Box<dyn Seeder + Send + Sync>, "Admin"),
        (Box::new(CustomerSeeder), "Customer"),
        (Box::new(TicketSeeder), "Ticket"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
