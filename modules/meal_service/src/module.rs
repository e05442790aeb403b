//! Module declaration and lifecycle implementation
//!
//! The host calls `migrate`, then `init`, then `register_rest`.

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::MealsApi;
use crate::domain::{Repositories, Service, TracingEventPublisher};
use crate::infra::storage::repositories::{
    SeaOrmChallengeRepository, SeaOrmCustomerRepository, SeaOrmKitchenOrderRepository,
    SeaOrmMenuRepository, SeaOrmOrderRepository, SeaOrmTierRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Meal service module
pub struct MealServiceModule {
    config: Config,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for MealServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MealServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            service: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build repositories and the domain service on top of the connection
    pub fn init(&self, db: Arc<DatabaseConnection>) -> Result<()> {
        let repos = Repositories {
            customers: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            tiers: Arc::new(SeaOrmTierRepository::new(db.clone())),
            menu: Arc::new(SeaOrmMenuRepository::new(db.clone())),
            orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            challenges: Arc::new(SeaOrmChallengeRepository::new(db.clone())),
            kitchen: Arc::new(SeaOrmKitchenOrderRepository::new(db)),
        };

        let config = self.config.clone();
        tracing::debug!(
            surcharge_cents = config.allergen_surcharge_cents,
            policy = ?config.surcharge_policy,
            "meal service configuration"
        );

        let service = Arc::new(Service::new(repos, Arc::new(TracingEventPublisher), config));
        *self.service.write() = Some(service);

        tracing::info!("Meal service initialized");
        Ok(())
    }

    /// Apply pending database migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Meal service migrations completed");
        Ok(())
    }

    /// Mount the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        tracing::info!("Registering meal service REST routes");
        Ok(crate::api::rest::routes::register_routes(router, service))
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn MealsApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }
}
