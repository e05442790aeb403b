//! Database migrations for the meal service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_catalog::Migration),
            Box::new(m20261001_000002_create_customers::Migration),
            Box::new(m20261001_000003_create_orders::Migration),
            Box::new(m20261001_000004_create_challenges::Migration),
            Box::new(m20261001_000005_create_kitchen_orders::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Tiers {
    Table,
    Id,
    Name,
    Description,
    CalorieTarget,
    ProteinTargetG,
    PriceCents,
    SortOrder,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MenuItems {
    Table,
    Id,
    Name,
    Description,
    Category,
    Allergens,
    Calories,
    ProteinG,
    PriceCents,
    AlwaysAvailable,
    Availability,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WeeklyMenus {
    Table,
    Id,
    WeekStart,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WeeklyMenuItems {
    Table,
    WeeklyMenuId,
    MenuItemId,
    Availability,
    Position,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    Phone,
    TierId,
    DaysPerWeek,
    MealsPerDay,
    IncludeBreakfast,
    Allergies,
    DietaryNotes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    CustomerId,
    TierId,
    WeekStart,
    Status,
    PlanCents,
    ExtrasCents,
    AllergenSurchargeCents,
    TotalCents,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    MenuItemId,
    MenuItemName,
    Category,
    WeekHalf,
    Quantity,
    UnitPriceCents,
    AllergenConflict,
    Position,
}

#[derive(DeriveIden)]
enum Challenges {
    Table,
    Id,
    Name,
    Description,
    StartsOn,
    EndsOn,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ChallengeParticipants {
    Table,
    Id,
    ChallengeId,
    CustomerId,
    TierId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum KitchenOrders {
    Table,
    Id,
    WeekStart,
    TierId,
    TierName,
    MenuItemId,
    MenuItemName,
    Category,
    WeekHalf,
    Quantity,
    AllergenFlagged,
    Position,
    GeneratedAt,
}

fn timestamp_col<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20261001_000001_create_catalog {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20261001_000001_create_catalog"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tiers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Tiers::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Tiers::Name).string().not_null())
                        .col(ColumnDef::new(Tiers::Description).text().not_null())
                        .col(ColumnDef::new(Tiers::CalorieTarget).integer().not_null())
                        .col(ColumnDef::new(Tiers::ProteinTargetG).integer().not_null())
                        .col(ColumnDef::new(Tiers::PriceCents).big_integer().not_null())
                        .col(ColumnDef::new(Tiers::SortOrder).integer().not_null().default(0))
                        .col(ColumnDef::new(Tiers::Active).boolean().not_null().default(true))
                        .col(timestamp_col(Tiers::CreatedAt))
                        .col(timestamp_col(Tiers::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(MenuItems::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(MenuItems::Name).string().not_null())
                        .col(ColumnDef::new(MenuItems::Description).text().not_null())
                        .col(ColumnDef::new(MenuItems::Category).string_len(16).not_null())
                        .col(ColumnDef::new(MenuItems::Allergens).json().not_null())
                        .col(ColumnDef::new(MenuItems::Calories).integer())
                        .col(ColumnDef::new(MenuItems::ProteinG).integer())
                        .col(
                            ColumnDef::new(MenuItems::PriceCents)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MenuItems::AlwaysAvailable)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(MenuItems::Availability).string_len(16).not_null())
                        .col(ColumnDef::new(MenuItems::Active).boolean().not_null().default(true))
                        .col(timestamp_col(MenuItems::CreatedAt))
                        .col(timestamp_col(MenuItems::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WeeklyMenus::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(WeeklyMenus::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(WeeklyMenus::WeekStart).date().not_null().unique_key())
                        .col(timestamp_col(WeeklyMenus::CreatedAt))
                        .col(timestamp_col(WeeklyMenus::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WeeklyMenuItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(WeeklyMenuItems::WeeklyMenuId).uuid().not_null())
                        .col(ColumnDef::new(WeeklyMenuItems::MenuItemId).uuid().not_null())
                        .col(
                            ColumnDef::new(WeeklyMenuItems::Availability)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(WeeklyMenuItems::Position).integer().not_null())
                        .primary_key(
                            Index::create()
                                .col(WeeklyMenuItems::WeeklyMenuId)
                                .col(WeeklyMenuItems::MenuItemId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_weekly_menu_items_menu")
                                .from(WeeklyMenuItems::Table, WeeklyMenuItems::WeeklyMenuId)
                                .to(WeeklyMenus::Table, WeeklyMenus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_weekly_menu_items_item")
                                .from(WeeklyMenuItems::Table, WeeklyMenuItems::MenuItemId)
                                .to(MenuItems::Table, MenuItems::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_menu_items_default")
                        .table(MenuItems::Table)
                        .col(MenuItems::AlwaysAvailable)
                        .col(MenuItems::Active)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WeeklyMenuItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(WeeklyMenus::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Tiers::Table).to_owned())
                .await
        }
    }
}

mod m20261001_000002_create_customers {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20261001_000002_create_customers"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Customers::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Customers::FirstName).string().not_null())
                        .col(ColumnDef::new(Customers::LastName).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string())
                        .col(ColumnDef::new(Customers::TierId).uuid())
                        .col(ColumnDef::new(Customers::DaysPerWeek).integer())
                        .col(ColumnDef::new(Customers::MealsPerDay).integer())
                        .col(ColumnDef::new(Customers::IncludeBreakfast).boolean())
                        .col(ColumnDef::new(Customers::Allergies).json().not_null())
                        .col(ColumnDef::new(Customers::DietaryNotes).text())
                        .col(timestamp_col(Customers::CreatedAt))
                        .col(timestamp_col(Customers::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_customers_tier")
                                .from(Customers::Table, Customers::TierId)
                                .to(Tiers::Table, Tiers::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }
}

mod m20261001_000003_create_orders {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20261001_000003_create_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Orders::OrderNumber).string().not_null().unique_key())
                        .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::TierId).uuid())
                        .col(ColumnDef::new(Orders::WeekStart).date().not_null())
                        .col(ColumnDef::new(Orders::Status).string_len(16).not_null())
                        .col(ColumnDef::new(Orders::PlanCents).big_integer().not_null())
                        .col(ColumnDef::new(Orders::ExtrasCents).big_integer().not_null())
                        .col(
                            ColumnDef::new(Orders::AllergenSurchargeCents)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::TotalCents).big_integer().not_null())
                        .col(ColumnDef::new(Orders::Notes).text())
                        .col(timestamp_col(Orders::CreatedAt))
                        .col(timestamp_col(Orders::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_tier")
                                .from(Orders::Table, Orders::TierId)
                                .to(Tiers::Table, Tiers::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            // One order per customer and week
            manager
                .create_index(
                    Index::create()
                        .name("idx_orders_customer_week")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .col(Orders::WeekStart)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_orders_week_start")
                        .table(Orders::Table)
                        .col(Orders::WeekStart)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(OrderItems::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::MenuItemId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::MenuItemName).string().not_null())
                        .col(ColumnDef::new(OrderItems::Category).string_len(16).not_null())
                        .col(ColumnDef::new(OrderItems::WeekHalf).string_len(16).not_null())
                        .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(OrderItems::UnitPriceCents).big_integer().not_null())
                        .col(
                            ColumnDef::new(OrderItems::AllergenConflict)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(OrderItems::Position).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }
}

mod m20261001_000004_create_challenges {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20261001_000004_create_challenges"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Challenges::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Challenges::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Challenges::Name).string().not_null())
                        .col(ColumnDef::new(Challenges::Description).text().not_null())
                        .col(ColumnDef::new(Challenges::StartsOn).date().not_null())
                        .col(ColumnDef::new(Challenges::EndsOn).date().not_null())
                        .col(ColumnDef::new(Challenges::Active).boolean().not_null().default(true))
                        .col(timestamp_col(Challenges::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ChallengeParticipants::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ChallengeParticipants::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ChallengeParticipants::ChallengeId).uuid().not_null())
                        .col(ColumnDef::new(ChallengeParticipants::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(ChallengeParticipants::TierId).uuid().not_null())
                        .col(timestamp_col(ChallengeParticipants::JoinedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_challenge_participants_challenge")
                                .from(
                                    ChallengeParticipants::Table,
                                    ChallengeParticipants::ChallengeId,
                                )
                                .to(Challenges::Table, Challenges::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_challenge_participants_customer")
                                .from(
                                    ChallengeParticipants::Table,
                                    ChallengeParticipants::CustomerId,
                                )
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_challenge_participants_tier")
                                .from(ChallengeParticipants::Table, ChallengeParticipants::TierId)
                                .to(Tiers::Table, Tiers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_challenge_participants_unique")
                        .table(ChallengeParticipants::Table)
                        .col(ChallengeParticipants::ChallengeId)
                        .col(ChallengeParticipants::CustomerId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ChallengeParticipants::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Challenges::Table).to_owned())
                .await
        }
    }
}

mod m20261001_000005_create_kitchen_orders {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20261001_000005_create_kitchen_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(KitchenOrders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(KitchenOrders::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(KitchenOrders::WeekStart).date().not_null())
                        .col(ColumnDef::new(KitchenOrders::TierId).uuid())
                        .col(ColumnDef::new(KitchenOrders::TierName).string().not_null())
                        .col(ColumnDef::new(KitchenOrders::MenuItemId).uuid().not_null())
                        .col(ColumnDef::new(KitchenOrders::MenuItemName).string().not_null())
                        .col(ColumnDef::new(KitchenOrders::Category).string_len(16).not_null())
                        .col(ColumnDef::new(KitchenOrders::WeekHalf).string_len(16).not_null())
                        .col(ColumnDef::new(KitchenOrders::Quantity).integer().not_null())
                        .col(ColumnDef::new(KitchenOrders::AllergenFlagged).integer().not_null())
                        .col(ColumnDef::new(KitchenOrders::Position).integer().not_null())
                        .col(timestamp_col(KitchenOrders::GeneratedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_kitchen_orders_week_start")
                        .table(KitchenOrders::Table)
                        .col(KitchenOrders::WeekStart)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(KitchenOrders::Table).to_owned())
                .await
        }
    }
}
