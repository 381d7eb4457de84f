use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202507150005_create_ticket_history"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("ticket_history"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("ticket_id"))
                            .big_integer()
                            .not_null(),
                    )
                    // Null marks the ticket-creation entry.
                    .col(ColumnDef::new(Alias::new("old_status")).enumeration(
                        Alias::new("ticket_status"),
                        vec![
                            Alias::new("pending"),
                            Alias::new("diagnosed"),
                            Alias::new("in_progress"),
                            Alias::new("ready_pickup"),
                            Alias::new("delivered"),
                            Alias::new("cancelled"),
                        ],
                    ))
                    .col(
                        ColumnDef::new(Alias::new("new_status"))
                            .enumeration(
                                Alias::new("ticket_status"),
                                vec![
                                    Alias::new("pending"),
                                    Alias::new("diagnosed"),
                                    Alias::new("in_progress"),
                                    Alias::new("ready_pickup"),
                                    Alias::new("delivered"),
                                    Alias::new("cancelled"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("changed_by")).text())
                    .col(ColumnDef::new(Alias::new("notes")).text())
                    .col(
                        ColumnDef::new(Alias::new("changed_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("ticket_history"), Alias::new("ticket_id"))
                            .to(Alias::new("tickets"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ticket_history_ticket_id")
                    .table(Alias::new("ticket_history"))
                    .col(Alias::new("ticket_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("ticket_history")).to_owned())
            .await
    }
}
