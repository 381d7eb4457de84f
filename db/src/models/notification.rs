use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use super::ticket::TicketStatus;

/// Customer-facing message in the `notifications` table.
///
/// Created only as a side effect of a ticket status change; the read flag
/// is the single mutable field.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub customer_id: i64,
    pub ticket_id: i64,

    pub message: String,
    pub is_read: bool,

    pub created_at: DateTime<Utc>,
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
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Writes the unread message for one committed status change.
    pub async fn notify_status_change<C: ConnectionTrait>(
        db: &C,
        customer_id: i64,
        ticket_id: i64,
        old_status: TicketStatus,
        new_status: TicketStatus,
    ) -> Result<Model, DbErr> {
        let message = format!(
            "Your ticket #{ticket_id} status changed from '{old_status}' to '{new_status}'."
        );

        let active_model = ActiveModel {
            customer_id: Set(customer_id),
            ticket_id: Set(ticket_id),
            message: Set(message),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(
        db: &C,
        notification_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(notification_id).one(db).await
    }

    /// All notifications for one customer, newest first.
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

    pub async fn unread_count<C: ConnectionTrait>(
        db: &C,
        customer_id: i64,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::CustomerId.eq(customer_id))
            .filter(Column::IsRead.eq(false))
            .count(db)
            .await
    }

    /// Sets the read flag. Marking an already-read notification is a no-op.
    pub async fn mark_read<C: ConnectionTrait>(db: &C, notification: Model) -> Result<Model, DbErr> {
        if notification.is_read {
            return Ok(notification);
        }

        let mut active_model: ActiveModel = notification.into();
        active_model.is_read = Set(true);
        active_model.update(db).await
    }
}
