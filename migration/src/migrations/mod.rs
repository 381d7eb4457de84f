pub mod m202507150001_create_customers;
pub mod m202507150002_create_admins;
pub mod m202507150003_create_devices;
pub mod m202507150004_create_tickets;
pub mod m202507150005_create_ticket_history;
pub mod m202507150006_create_notifications;
