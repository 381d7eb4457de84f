use chrono::{DateTime, Utc};
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a repair ticket in the `tickets` table.
///
/// A ticket links one customer to one device and tracks the repair through
/// its lifecycle. `completed_at` is set exactly when the ticket reaches
/// `delivered`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
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

/// Lifecycle stage of a repair ticket.
///
/// Transitions are restricted to the adjacency table in [`TicketStatus::valid_next`];
/// everything else is rejected by the lifecycle engine.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "diagnosed")]
    Diagnosed,

    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "ready_pickup")]
    ReadyPickup,

    #[sea_orm(string_value = "delivered")]
    Delivered,

    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl TicketStatus {
    /// Adjacency table of the status state machine.
    ///
    /// A transition is legal iff the requested status appears in the slice
    /// returned for the current status. Self-transitions are deliberately
    /// absent: re-requesting the current status is rejected.
    pub fn valid_next(self) -> &'static [TicketStatus] {
        use TicketStatus::*;
        match self {
            Pending => &[Diagnosed, Cancelled],
            Diagnosed => &[InProgress, ReadyPickup, Cancelled],
            InProgress => &[ReadyPickup, Cancelled],
            ReadyPickup => &[Delivered, Cancelled],
            Delivered => &[],
            Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        self.valid_next().contains(&next)
    }

    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        self.valid_next().is_empty()
    }

    /// Whether reaching this status stamps `completed_at`.
    pub fn is_completion(self) -> bool {
        matches!(self, TicketStatus::Delivered)
    }
}

/// Urgency of a repair ticket.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketPriority {
    #[sea_orm(string_value = "low")]
    Low,

    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,

    #[sea_orm(string_value = "high")]
    High,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,

    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id"
    )]
    Device,

    #[sea_orm(has_many = "super::ticket_history::Entity")]
    History,

    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl Related<super::ticket_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn get_by_id<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(ticket_id).one(db).await
    }

    /// All tickets belonging to one customer, newest first.
    pub async fn find_for_customer<C: ConnectionTrait>(
        db: &C,
        customer_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CustomerId.eq(customer_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::TicketStatus::{self, *};
    use sea_orm::Iterable;

    #[test]
    fn adjacency_table_matches_policy() {
        assert_eq!(Pending.valid_next(), &[Diagnosed, Cancelled]);
        assert_eq!(Diagnosed.valid_next(), &[InProgress, ReadyPickup, Cancelled]);
        assert_eq!(InProgress.valid_next(), &[ReadyPickup, Cancelled]);
        assert_eq!(ReadyPickup.valid_next(), &[Delivered, Cancelled]);
        assert!(Delivered.valid_next().is_empty());
        assert!(Cancelled.valid_next().is_empty());
    }

    #[test]
    fn self_transitions_are_never_legal() {
        for status in TicketStatus::iter() {
            assert!(
                !status.can_transition_to(status),
                "{status} must not transition to itself"
            );
        }
    }

    #[test]
    fn every_non_terminal_status_can_cancel() {
        for status in TicketStatus::iter() {
            if !status.is_terminal() {
                assert!(status.can_transition_to(Cancelled), "{status} cannot cancel");
            }
        }
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        for status in TicketStatus::iter() {
            for next in TicketStatus::iter() {
                if status.is_terminal() {
                    assert!(!status.can_transition_to(next));
                }
            }
        }
    }

    #[test]
    fn only_delivered_is_a_completion() {
        for status in TicketStatus::iter() {
            assert_eq!(status.is_completion(), status == Delivered);
        }
    }

    #[test]
    fn status_strings_roundtrip() {
        for status in TicketStatus::iter() {
            let parsed: TicketStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!("ready_pickup".parse::<TicketStatus>().unwrap(), ReadyPickup);
        assert!("unheard_of".parse::<TicketStatus>().is_err());
    }
}
