use chrono::{DateTime, Utc};
use db::models::customer::Model as CustomerModel;
use db::models::device::{DeviceType, Model as DeviceModel};
use db::models::ticket::{Model as TicketModel, TicketPriority, TicketStatus};
use db::models::ticket_history::Model as HistoryModel;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct TicketResponse {
    pub id: i64,
    pub customer_id: i64,
    pub device_id: i64,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<TicketModel> for TicketResponse {
    fn from(ticket: TicketModel) -> Self {
        Self {
            id: ticket.id,
            customer_id: ticket.customer_id,
            device_id: ticket.device_id,
            status: ticket.status,
            priority: ticket.priority,
            estimated_cost: ticket.estimated_cost,
            actual_cost: ticket.actual_cost,
            notes: ticket.notes,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            completed_at: ticket.completed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<CustomerModel> for CustomerSummary {
    fn from(customer: CustomerModel) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceResponse {
    pub id: i64,
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub issue_description: String,
    pub serial_number: Option<String>,
}

impl From<DeviceModel> for DeviceResponse {
    fn from(device: DeviceModel) -> Self {
        Self {
            id: device.id,
            device_type: device.device_type,
            brand: device.brand,
            model: device.model,
            issue_description: device.issue_description,
            serial_number: device.serial_number,
        }
    }
}

/// Full ticket view returned by single-ticket lookups.
#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub customer: CustomerSummary,
    pub device: DeviceResponse,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub old_status: Option<TicketStatus>,
    pub new_status: TicketStatus,
    pub changed_by: Option<String>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl From<HistoryModel> for HistoryEntryResponse {
    fn from(entry: HistoryModel) -> Self {
        Self {
            id: entry.id,
            ticket_id: entry.ticket_id,
            old_status: entry.old_status,
            new_status: entry.new_status,
            changed_by: entry.changed_by,
            notes: entry.notes,
            changed_at: entry.changed_at,
        }
    }
}
