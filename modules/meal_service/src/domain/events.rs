//! Domain events for the meal service
//!
//! Events are emitted after the state change succeeded. Publishing failures
//! are logged by the caller and never fail the operation.

use crate::contract::model::{KitchenReport, Order, OrderStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// Order was created or a pending order was replaced
    OrderSubmitted(OrderSubmittedEvent),
    /// Order moved forward in its lifecycle
    OrderStatusChanged(OrderStatusChangedEvent),
    /// Kitchen prep lines were regenerated for a week
    KitchenReportGenerated(KitchenReportGeneratedEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmittedEvent {
    pub order_id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub week_start: NaiveDate,
    pub total_cents: i64,
    /// False when a pending order was replaced
    pub is_new: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChangedEvent {
    pub order_id: Uuid,
    pub order_number: String,
    pub from: String,
    pub to: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenReportGeneratedEvent {
    pub week_start: NaiveDate,
    pub order_count: usize,
    pub total_portions: u32,
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: OrderEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: OrderEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Publishes events as structured log lines
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: OrderEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "meal_service::events", event = %payload, "domain event");
        Ok(())
    }
}

impl OrderEvent {
    pub fn submitted(order: &Order, is_new: bool) -> Self {
        OrderEvent::OrderSubmitted(OrderSubmittedEvent {
            order_id: order.id,
            order_number: order.order_number.clone(),
            customer_id: order.customer_id,
            week_start: order.week_start,
            total_cents: order.totals.total_cents,
            is_new,
            timestamp: Utc::now(),
        })
    }

    pub fn status_changed(order: &Order, from: OrderStatus) -> Self {
        OrderEvent::OrderStatusChanged(OrderStatusChangedEvent {
            order_id: order.id,
            order_number: order.order_number.clone(),
            from: from.to_string(),
            to: order.status.to_string(),
            timestamp: Utc::now(),
        })
    }

    pub fn report_generated(report: &KitchenReport) -> Self {
        OrderEvent::KitchenReportGenerated(KitchenReportGeneratedEvent {
            week_start: report.week_start,
            order_count: report.order_count,
            total_portions: report.total_portions,
            timestamp: report.generated_at,
        })
    }
}
