//! Domain layer - business logic and services

pub mod events;
pub mod pricing;
pub mod quota;
pub mod report;
pub mod repository;
pub mod service;
pub mod validation;
pub mod week;

pub use events::{EventPublisher, NoOpEventPublisher, OrderEvent, TracingEventPublisher};
pub use repository::{
    ChallengeRepository, CustomerRepository, KitchenOrderRepository, MenuRepository,
    OrderRepository, TierRepository, UniqueViolation,
};
pub use service::{Repositories, Service};
