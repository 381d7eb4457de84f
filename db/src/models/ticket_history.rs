use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use super::ticket::TicketStatus;

/// Append-only audit entry in the `ticket_history` table.
///
/// One row is written per committed status change. The ticket-creation row
/// has `old_status = None`. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "ticket_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub ticket_id: i64,

    pub old_status: Option<TicketStatus>,
    pub new_status: TicketStatus,

    /// Actor label (admin username), or `None` for system-initiated changes.
    pub changed_by: Option<String>,
    pub notes: Option<String>,

    pub changed_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn record<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
        old_status: Option<TicketStatus>,
        new_status: TicketStatus,
        changed_by: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            ticket_id: Set(ticket_id),
            old_status: Set(old_status),
            new_status: Set(new_status),
            changed_by: Set(changed_by.map(str::to_owned)),
            notes: Set(notes.map(str::to_owned)),
            changed_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Full audit trail for one ticket, oldest entry first. The insertion id
    /// breaks ties between rows stamped within the same second.
    pub async fn find_for_ticket<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_asc(Column::ChangedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}
