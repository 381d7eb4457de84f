use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202507150003_create_devices"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("devices"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("device_type"))
                            .enumeration(
                                Alias::new("device_type"),
                                vec![
                                    Alias::new("phone"),
                                    Alias::new("laptop"),
                                    Alias::new("tablet"),
                                    Alias::new("desktop"),
                                    Alias::new("watch"),
                                    Alias::new("other"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("brand")).text().not_null())
                    .col(ColumnDef::new(Alias::new("model")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("issue_description"))
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("serial_number")).text())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("devices")).to_owned())
            .await
    }
}
