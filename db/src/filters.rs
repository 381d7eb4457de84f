use chrono::{DateTime, Utc};

use crate::models::device::DeviceType;
use crate::models::ticket::{TicketPriority, TicketStatus};

/// Conjunctive ticket search criteria. A `None` field matches everything
/// for that dimension.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    /// Case-insensitive substring matched against customer name OR email.
    pub customer: Option<String>,
    pub device_type: Option<DeviceType>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_customer(mut self, customer: String) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    pub fn with_created_from(mut self, date: DateTime<Utc>) -> Self {
        self.created_from = Some(date);
        self
    }

    pub fn with_created_to(mut self, date: DateTime<Utc>) -> Self {
        self.created_to = Some(date);
        self
    }
}
