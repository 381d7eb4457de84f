use crate::routes::common::parse_datetime;
use db::filters::TicketFilter;
use db::models::device::DeviceType;
use db::models::ticket::{TicketPriority, TicketStatus};
use serde::Deserialize;

/// Query parameters shared by ticket search and dashboard stats. The
/// stats endpoint ignores the pagination and sort fields.
#[derive(Debug, Deserialize)]
pub struct TicketSearchQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Case-insensitive substring matched against customer name or email.
    pub customer: Option<String>,
    pub device_type: Option<String>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD`.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Comma-separated sort fields, `-` prefix for descending.
    pub sort: Option<String>,
}

/// Translates the raw query strings into a typed filter, or an error
/// message suitable for a 400 response.
pub fn build_filter(params: &TicketSearchQuery) -> Result<TicketFilter, String> {
    let mut filter = TicketFilter::new();

    if let Some(raw) = &params.status {
        let status = raw
            .parse::<TicketStatus>()
            .map_err(|_| format!("Invalid status: '{raw}'"))?;
        filter = filter.with_status(status);
    }

    if let Some(raw) = &params.priority {
        let priority = raw
            .parse::<TicketPriority>()
            .map_err(|_| format!("Invalid priority: '{raw}'"))?;
        filter = filter.with_priority(priority);
    }

    if let Some(customer) = &params.customer {
        filter = filter.with_customer(customer.clone());
    }

    if let Some(raw) = &params.device_type {
        let device_type = raw
            .parse::<DeviceType>()
            .map_err(|_| format!("Invalid device type: '{raw}'"))?;
        filter = filter.with_device_type(device_type);
    }

    if let Some(raw) = &params.date_from {
        let from = parse_datetime(raw).ok_or_else(|| format!("Invalid date_from: '{raw}'"))?;
        filter = filter.with_created_from(from);
    }

    if let Some(raw) = &params.date_to {
        let to = parse_datetime(raw).ok_or_else(|| format!("Invalid date_to: '{raw}'"))?;
        filter = filter.with_created_to(to);
    }

    Ok(filter)
}
