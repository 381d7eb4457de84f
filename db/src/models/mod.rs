pub mod admin;
pub mod customer;
pub mod device;
pub mod notification;
pub mod ticket;
pub mod ticket_history;

pub use admin::Entity as Admin;
pub use customer::Entity as Customer;
pub use device::Entity as Device;
pub use notification::Entity as Notification;
pub use ticket::Entity as Ticket;
pub use ticket_history::Entity as TicketHistory;
