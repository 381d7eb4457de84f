//! Ticket lifecycle engine.
//!
//! This module owns the only non-trivial business rule in the system: the
//! status state machine and the side effects of a committed transition.
//! Every status change runs as one database transaction that
//!
//! 1. re-reads the ticket (so the policy is evaluated against the latest
//!    committed status, never a stale read),
//! 2. checks the transition against [`TicketStatus::valid_next`],
//! 3. applies the mutation and timestamps,
//! 4. appends the audit entry, and
//! 5. emits the customer notification.
//!
//! A rejected transition rolls the whole transaction back: ticket, history
//! and notifications are left untouched.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Iterable,
    JoinType, QueryFilter, QuerySelect, RelationTrait, Select, TransactionTrait,
};
use serde::Serialize;

use crate::filters::TicketFilter;
use crate::models::device::{self, DeviceType};
use crate::models::notification;
use crate::models::ticket::{self, TicketPriority, TicketStatus};
use crate::models::ticket_history;
use crate::models::{customer, ticket::Entity as TicketEntity};

/// Errors surfaced by the lifecycle engine.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("cannot transition from '{from}' to '{to}'")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for the public booking operation.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub device_type: DeviceType,
    pub device_brand: String,
    pub device_model: String,
    pub issue_description: String,
    pub serial_number: Option<String>,
    pub priority: Option<TicketPriority>,
    pub estimated_cost: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update of a ticket. `None` fields are left unchanged; a present
/// `status` must pass the transition policy or the whole update is
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct TicketUpdate {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub notes: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    /// Actor recorded on the audit entry, `None` for system changes.
    pub changed_by: Option<String>,
}

/// Per-ticket outcome of a bulk status update.
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateOutcome {
    pub id: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated dashboard numbers over a (possibly filtered) ticket set.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    /// Mean of the non-null estimates, rounded to cents; 0.0 for an empty set.
    pub average_estimated_cost: f64,
}

fn check_cost(field: &'static str, value: Option<f64>) -> Result<(), TicketError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(TicketError::ValidationFailed(format!(
            "{field} must be a non-negative amount"
        ))),
        _ => Ok(()),
    }
}

/// Books a new repair: get-or-create the customer by email, create the
/// device, create the ticket in the entry status and append the initial
/// audit entry, all in one transaction. No notification is emitted for the
/// creation entry.
pub async fn create_ticket(
    db: &DatabaseConnection,
    input: NewTicket,
) -> Result<ticket::Model, TicketError> {
    check_cost("estimated_cost", input.estimated_cost)?;

    let txn = db.begin().await?;

    let customer = customer::Model::get_or_create(
        &txn,
        &input.customer_name,
        &input.customer_email,
        &input.customer_phone,
    )
    .await?;

    let device = device::Model::create(
        &txn,
        input.device_type,
        &input.device_brand,
        &input.device_model,
        &input.issue_description,
        input.serial_number.as_deref(),
    )
    .await?;

    let now = Utc::now();
    let ticket = ticket::ActiveModel {
        customer_id: Set(customer.id),
        device_id: Set(device.id),
        status: Set(TicketStatus::Pending),
        priority: Set(input.priority.unwrap_or_default()),
        estimated_cost: Set(input.estimated_cost),
        actual_cost: Set(None),
        notes: Set(input.notes.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        completed_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    ticket_history::Model::record(
        &txn,
        ticket.id,
        None,
        TicketStatus::Pending,
        None,
        input.notes.as_deref(),
    )
    .await?;

    txn.commit().await?;

    tracing::info!(ticket_id = ticket.id, customer_id = customer.id, "ticket booked");
    Ok(ticket)
}

/// Applies a partial update to a ticket.
///
/// Field updates unrelated to status apply regardless of the current
/// state; a requested status is checked against the policy first and a
/// rejection aborts the entire update.
pub async fn update_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
    update: TicketUpdate,
) -> Result<ticket::Model, TicketError> {
    check_cost("estimated_cost", update.estimated_cost)?;
    check_cost("actual_cost", update.actual_cost)?;

    let txn = db.begin().await?;

    let ticket = ticket::Model::get_by_id(&txn, ticket_id)
        .await?
        .ok_or(TicketError::NotFound {
            entity: "ticket",
            id: ticket_id,
        })?;

    let old_status = ticket.status;
    if let Some(requested) = update.status {
        if !old_status.can_transition_to(requested) {
            return Err(TicketError::InvalidTransition {
                from: old_status,
                to: requested,
            });
        }
    }

    let customer_id = ticket.customer_id;
    let mut active_model: ticket::ActiveModel = ticket.into();

    if let Some(priority) = update.priority {
        active_model.priority = Set(priority);
    }
    if let Some(notes) = &update.notes {
        active_model.notes = Set(Some(notes.clone()));
    }
    if let Some(estimated_cost) = update.estimated_cost {
        active_model.estimated_cost = Set(Some(estimated_cost));
    }
    if let Some(actual_cost) = update.actual_cost {
        active_model.actual_cost = Set(Some(actual_cost));
    }
    if let Some(new_status) = update.status {
        active_model.status = Set(new_status);
        if new_status.is_completion() {
            active_model.completed_at = Set(Some(Utc::now()));
        }
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model.update(&txn).await?;

    if let Some(new_status) = update.status {
        ticket_history::Model::record(
            &txn,
            ticket_id,
            Some(old_status),
            new_status,
            update.changed_by.as_deref(),
            update.notes.as_deref(),
        )
        .await?;

        notification::Model::notify_status_change(
            &txn,
            customer_id,
            ticket_id,
            old_status,
            new_status,
        )
        .await?;
    }

    txn.commit().await?;

    if let Some(new_status) = update.status {
        tracing::info!(
            ticket_id,
            from = %old_status,
            to = %new_status,
            changed_by = update.changed_by.as_deref().unwrap_or("system"),
            "ticket status changed"
        );
    }
    Ok(updated)
}

/// Applies one target status to many tickets, each through the full
/// transition pipeline in its own transaction. One rejection never affects
/// the other tickets; the caller gets a per-ticket report.
pub async fn bulk_update_status(
    db: &DatabaseConnection,
    ticket_ids: &[i64],
    target: TicketStatus,
    changed_by: Option<&str>,
) -> Vec<BulkUpdateOutcome> {
    let mut report = Vec::with_capacity(ticket_ids.len());

    for &id in ticket_ids {
        let update = TicketUpdate {
            status: Some(target),
            changed_by: changed_by.map(str::to_owned),
            ..Default::default()
        };

        match update_ticket(db, id, update).await {
            Ok(_) => report.push(BulkUpdateOutcome {
                id,
                success: true,
                error: None,
            }),
            Err(err) => report.push(BulkUpdateOutcome {
                id,
                success: false,
                error: Some(err.to_string()),
            }),
        }
    }

    report
}

/// Legal next statuses for a ticket, from its latest committed status.
pub async fn valid_next_statuses(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<(TicketStatus, &'static [TicketStatus]), TicketError> {
    let ticket = ticket::Model::get_by_id(db, ticket_id)
        .await?
        .ok_or(TicketError::NotFound {
            entity: "ticket",
            id: ticket_id,
        })?;

    Ok((ticket.status, ticket.status.valid_next()))
}

/// Builds the filtered ticket query shared by search and dashboard stats.
/// Joins to customers/devices only when the corresponding filter is set.
pub fn filtered_query(filter: &TicketFilter) -> Select<TicketEntity> {
    let mut condition = Condition::all();

    if let Some(status) = filter.status {
        condition = condition.add(ticket::Column::Status.eq(status));
    }

    if let Some(priority) = filter.priority {
        condition = condition.add(ticket::Column::Priority.eq(priority));
    }

    if let Some(ref customer) = filter.customer {
        let pattern = format!("%{}%", customer.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(Expr::cust("LOWER(customers.name)").like(&pattern))
                .add(Expr::cust("LOWER(customers.email)").like(&pattern)),
        );
    }

    if let Some(device_type) = filter.device_type {
        condition = condition.add(device::Column::DeviceType.eq(device_type));
    }

    if let Some(from) = filter.created_from {
        condition = condition.add(ticket::Column::CreatedAt.gte(from));
    }

    if let Some(to) = filter.created_to {
        condition = condition.add(ticket::Column::CreatedAt.lte(to));
    }

    let mut query = TicketEntity::find();

    if filter.customer.is_some() {
        query = query.join(JoinType::InnerJoin, ticket::Relation::Customer.def());
    }

    if filter.device_type.is_some() {
        query = query.join(JoinType::InnerJoin, ticket::Relation::Device.def());
    }

    query.filter(condition)
}

/// Computes dashboard statistics over the filtered ticket set. Every
/// status and priority appears in the maps, zero-filled, so an empty set
/// yields all-zero counts and an average of 0.0 rather than an error.
pub async fn dashboard_stats(
    db: &DatabaseConnection,
    filter: &TicketFilter,
) -> Result<DashboardStats, TicketError> {
    let tickets = filtered_query(filter).all(db).await?;

    let mut by_status: BTreeMap<String, u64> = TicketStatus::iter()
        .map(|status| (status.to_string(), 0))
        .collect();
    let mut by_priority: BTreeMap<String, u64> = TicketPriority::iter()
        .map(|priority| (priority.to_string(), 0))
        .collect();

    let mut estimate_sum = 0.0;
    let mut estimate_count = 0u64;

    for ticket in &tickets {
        *by_status.entry(ticket.status.to_string()).or_insert(0) += 1;
        *by_priority.entry(ticket.priority.to_string()).or_insert(0) += 1;

        if let Some(estimate) = ticket.estimated_cost {
            estimate_sum += estimate;
            estimate_count += 1;
        }
    }

    let average_estimated_cost = if estimate_count > 0 {
        (estimate_sum / estimate_count as f64 * 100.0).round() / 100.0
    } else {
        0.0
    };

    Ok(DashboardStats {
        total: tickets.len() as u64,
        by_status,
        by_priority,
        average_estimated_cost,
    })
}

/// Marks one notification read on behalf of a customer. Idempotent;
/// customers can only touch their own notifications.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    notification_id: i64,
    customer_id: i64,
) -> Result<notification::Model, TicketError> {
    let found = notification::Model::get_by_id(db, notification_id)
        .await?
        .ok_or(TicketError::NotFound {
            entity: "notification",
            id: notification_id,
        })?;

    if found.customer_id != customer_id {
        return Err(TicketError::Unauthorized(
            "notification belongs to another customer",
        ));
    }

    Ok(notification::Model::mark_read(db, found).await?)
}
