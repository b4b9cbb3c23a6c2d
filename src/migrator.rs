// async_trait-generated impls elide the SchemaManager lifetime, which the
// crate-level `deny(rust_2018_idioms)` flags; naming it makes the lifetime
// early-bound and breaks the trait signature, so allow the elision here.
#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_suppliers_table::Migration),
            Box::new(m20240101_000002_create_positions_table::Migration),
            Box::new(m20240101_000003_create_skus_table::Migration),
            Box::new(m20240101_000004_create_test_descriptors_table::Migration),
            Box::new(m20240101_000005_create_sku_items_table::Migration),
            Box::new(m20240101_000006_create_restock_order_tables::Migration),
            Box::new(m20240101_000007_create_internal_order_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_suppliers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_suppliers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Suppliers {
        Table,
        Id,
        Name,
    }
}

mod m20240101_000002_create_positions_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_positions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Positions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Positions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Positions::PositionId)
                                .string_len(12)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Positions::Aisle).string_len(4).not_null())
                        .col(ColumnDef::new(Positions::Row).string_len(4).not_null())
                        .col(ColumnDef::new(Positions::Col).string_len(4).not_null())
                        .col(ColumnDef::new(Positions::MaxWeight).integer().not_null())
                        .col(ColumnDef::new(Positions::MaxVolume).integer().not_null())
                        .col(
                            ColumnDef::new(Positions::OccupiedWeight)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Positions::OccupiedVolume)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Positions::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Positions {
        Table,
        Id,
        PositionId,
        Aisle,
        Row,
        Col,
        MaxWeight,
        MaxVolume,
        OccupiedWeight,
        OccupiedVolume,
    }
}

mod m20240101_000003_create_skus_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_skus_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Skus::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Skus::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Skus::Description).string().not_null())
                        .col(ColumnDef::new(Skus::Weight).integer().not_null())
                        .col(ColumnDef::new(Skus::Volume).integer().not_null())
                        .col(ColumnDef::new(Skus::Notes).string().null())
                        .col(ColumnDef::new(Skus::Price).decimal().not_null())
                        .col(
                            ColumnDef::new(Skus::AvailableQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Skus::PositionId).integer().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_skus_position")
                                .from(Skus::Table, Skus::PositionId)
                                .to(Positions::Table, Positions::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Skus::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Skus {
        Table,
        Id,
        Description,
        Weight,
        Volume,
        Notes,
        Price,
        AvailableQuantity,
        PositionId,
    }

    #[derive(Iden)]
    enum Positions {
        Table,
        Id,
    }
}

mod m20240101_000004_create_test_descriptors_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_test_descriptors_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TestDescriptors::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TestDescriptors::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TestDescriptors::Name).string().not_null())
                        .col(
                            ColumnDef::new(TestDescriptors::ProcedureDescription)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TestDescriptors::IdSku).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_test_descriptors_sku")
                                .from(TestDescriptors::Table, TestDescriptors::IdSku)
                                .to(Skus::Table, Skus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_test_descriptors_sku")
                        .table(TestDescriptors::Table)
                        .col(TestDescriptors::IdSku)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TestDescriptors::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum TestDescriptors {
        Table,
        Id,
        Name,
        ProcedureDescription,
        IdSku,
    }

    #[derive(Iden)]
    enum Skus {
        Table,
        Id,
    }
}

mod m20240101_000005_create_sku_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_sku_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SkuItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SkuItems::Rfid)
                                .string_len(32)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SkuItems::SkuId).integer().not_null())
                        .col(
                            ColumnDef::new(SkuItems::Available)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(SkuItems::DateOfStock).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sku_items_sku")
                                .from(SkuItems::Table, SkuItems::SkuId)
                                .to(Skus::Table, Skus::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sku_items_sku")
                        .table(SkuItems::Table)
                        .col(SkuItems::SkuId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SkuItems::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum SkuItems {
        Table,
        Rfid,
        SkuId,
        Available,
        DateOfStock,
    }

    #[derive(Iden)]
    enum Skus {
        Table,
        Id,
    }
}

mod m20240101_000006_create_restock_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_restock_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RestockOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RestockOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(RestockOrders::IssueDate).string().not_null())
                        .col(ColumnDef::new(RestockOrders::State).string().not_null())
                        .col(ColumnDef::new(RestockOrders::SupplierId).integer().not_null())
                        .col(
                            ColumnDef::new(RestockOrders::TransportNoteDeliveryDate)
                                .string()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_restock_orders_supplier")
                                .from(RestockOrders::Table, RestockOrders::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_restock_orders_state")
                        .table(RestockOrders::Table)
                        .col(RestockOrders::State)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RestockOrderProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RestockOrderProducts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderProducts::OrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderProducts::SkuId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RestockOrderProducts::ItemId).integer().null())
                        .col(
                            ColumnDef::new(RestockOrderProducts::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderProducts::Price)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderProducts::Qty)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_restock_order_products_order")
                                .from(RestockOrderProducts::Table, RestockOrderProducts::OrderId)
                                .to(RestockOrders::Table, RestockOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_restock_order_products_order")
                        .table(RestockOrderProducts::Table)
                        .col(RestockOrderProducts::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RestockOrderSkuItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RestockOrderSkuItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderSkuItems::OrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderSkuItems::SkuId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderSkuItems::ItemId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RestockOrderSkuItems::Rfid)
                                .string_len(32)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_restock_order_sku_items_order")
                                .from(RestockOrderSkuItems::Table, RestockOrderSkuItems::OrderId)
                                .to(RestockOrders::Table, RestockOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_restock_order_sku_items_order")
                        .table(RestockOrderSkuItems::Table)
                        .col(RestockOrderSkuItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RestockOrderSkuItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RestockOrderProducts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RestockOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum RestockOrders {
        Table,
        Id,
        IssueDate,
        State,
        SupplierId,
        TransportNoteDeliveryDate,
    }

    #[derive(Iden)]
    enum RestockOrderProducts {
        Table,
        Id,
        OrderId,
        SkuId,
        ItemId,
        Description,
        Price,
        Qty,
    }

    #[derive(Iden)]
    enum RestockOrderSkuItems {
        Table,
        Id,
        OrderId,
        SkuId,
        ItemId,
        Rfid,
    }

    #[derive(Iden)]
    enum Suppliers {
        Table,
        Id,
    }
}

mod m20240101_000007_create_internal_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_internal_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InternalOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InternalOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InternalOrders::IssueDate).string().not_null())
                        .col(ColumnDef::new(InternalOrders::State).string().not_null())
                        .col(
                            ColumnDef::new(InternalOrders::CustomerId)
                                .integer()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_internal_orders_state")
                        .table(InternalOrders::Table)
                        .col(InternalOrders::State)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InternalOrderProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InternalOrderProducts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderProducts::OrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderProducts::SkuId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderProducts::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderProducts::Price)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderProducts::Qty)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_internal_order_products_order")
                                .from(InternalOrderProducts::Table, InternalOrderProducts::OrderId)
                                .to(InternalOrders::Table, InternalOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InternalOrderDeliveries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InternalOrderDeliveries::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderDeliveries::OrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderDeliveries::SkuId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalOrderDeliveries::Rfid)
                                .string_len(32)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_internal_order_deliveries_order")
                                .from(
                                    InternalOrderDeliveries::Table,
                                    InternalOrderDeliveries::OrderId,
                                )
                                .to(InternalOrders::Table, InternalOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InternalOrderDeliveries::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InternalOrderProducts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InternalOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum InternalOrders {
        Table,
        Id,
        IssueDate,
        State,
        CustomerId,
    }

    #[derive(Iden)]
    enum InternalOrderProducts {
        Table,
        Id,
        OrderId,
        SkuId,
        Description,
        Price,
        Qty,
    }

    #[derive(Iden)]
    enum InternalOrderDeliveries {
        Table,
        Id,
        OrderId,
        SkuId,
        Rfid,
    }
}
