//! SeaORM entities for database tables
//!
//! Enumerations are stored as their lowercase string form, allergen lists as JSON
//! arrays and money as integer cents.

/// Customer profiles with their flattened preferences
pub mod customer {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub phone: Option<String>,
        pub tier_id: Option<Uuid>,
        pub days_per_week: Option<i32>,
        pub meals_per_day: Option<i32>,
        pub include_breakfast: Option<bool>,
        /// JSON array of allergen names
        pub allergies: Json,
        pub dietary_notes: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::tier::Entity",
            from = "Column::TierId",
            to = "super::tier::Column::Id"
        )]
        Tier,
    }

    impl Related<super::tier::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Tier.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Subscription tiers
pub mod tier {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "tiers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub calorie_target: i32,
        pub protein_target_g: i32,
        pub price_cents: i64,
        pub sort_order: i32,
        pub active: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Menu catalog
pub mod menu_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "menu_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub category: String,
        pub allergens: Json,
        pub calories: Option<i32>,
        pub protein_g: Option<i32>,
        pub price_cents: i64,
        pub always_available: bool,
        pub availability: String,
        pub active: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Weekly menu headers, one per week
pub mod weekly_menu {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "weekly_menus")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub week_start: Date,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::weekly_menu_item::Entity")]
        Items,
    }

    impl Related<super::weekly_menu_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Items offered by a weekly menu
pub mod weekly_menu_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "weekly_menu_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub weekly_menu_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub menu_item_id: Uuid,
        pub availability: String,
        /// Preserves the admin's ordering
        pub position: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::weekly_menu::Entity",
            from = "Column::WeeklyMenuId",
            to = "super::weekly_menu::Column::Id"
        )]
        WeeklyMenu,
        #[sea_orm(
            belongs_to = "super::menu_item::Entity",
            from = "Column::MenuItemId",
            to = "super::menu_item::Column::Id"
        )]
        MenuItem,
    }

    impl Related<super::weekly_menu::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::WeeklyMenu.def()
        }
    }

    impl Related<super::menu_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::MenuItem.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Order headers
pub mod order {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub order_number: String,
        pub customer_id: Uuid,
        pub tier_id: Option<Uuid>,
        pub week_start: Date,
        pub status: String,
        pub plan_cents: i64,
        pub extras_cents: i64,
        pub allergen_surcharge_cents: i64,
        pub total_cents: i64,
        pub notes: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_item::Entity")]
        Items,
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
    }

    impl Related<super::order_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Order line items
pub mod order_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_id: Uuid,
        pub menu_item_id: Uuid,
        /// Snapshot of the item name at order time
        pub menu_item_name: String,
        pub category: String,
        pub week_half: String,
        pub quantity: i32,
        pub unit_price_cents: i64,
        pub allergen_conflict: bool,
        pub position: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id"
        )]
        Order,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Nutrition challenges
pub mod challenge {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "challenges")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub starts_on: Date,
        pub ends_on: Date,
        pub active: bool,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::challenge_participant::Entity")]
        Participants,
    }

    impl Related<super::challenge_participant::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Participants.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Challenge registrations
pub mod challenge_participant {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "challenge_participants")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub challenge_id: Uuid,
        pub customer_id: Uuid,
        pub tier_id: Uuid,
        pub joined_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::challenge::Entity",
            from = "Column::ChallengeId",
            to = "super::challenge::Column::Id"
        )]
        Challenge,
    }

    impl Related<super::challenge::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Challenge.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Prep lines of the last generated kitchen report
pub mod kitchen_order {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "kitchen_orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub week_start: Date,
        pub tier_id: Option<Uuid>,
        pub tier_name: String,
        pub menu_item_id: Uuid,
        pub menu_item_name: String,
        pub category: String,
        pub week_half: String,
        pub quantity: i32,
        pub allergen_flagged: i32,
        pub position: i32,
        pub generated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
