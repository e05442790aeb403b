//! Route registration

use super::{handlers, openapi};
use crate::domain::Service;
use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // Tier endpoints
        .route("/tiers", get(handlers::list_tiers).post(handlers::create_tier))
        .route("/tiers/{id}", get(handlers::get_tier).put(handlers::update_tier))
        // Customer endpoints
        .route("/customers", post(handlers::register_customer))
        .route("/customers/me", get(handlers::get_me))
        .route("/customers/me/preferences", put(handlers::update_preferences))
        .route("/customers/me/allowance", get(handlers::get_allowance))
        // Menu endpoints
        .route("/menu", get(handlers::get_menu))
        .route("/menu/items", post(handlers::create_menu_item))
        .route(
            "/menu/items/{id}",
            get(handlers::get_menu_item).put(handlers::update_menu_item),
        )
        .route("/menu/weekly/{week_start}", put(handlers::set_weekly_menu))
        // Order endpoints
        .route("/orders", get(handlers::list_orders).post(handlers::submit_order))
        .route("/orders/current", get(handlers::current_order))
        .route("/orders/quote", post(handlers::quote_order))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/status", put(handlers::update_order_status))
        // Challenge endpoints
        .route(
            "/challenges",
            get(handlers::list_challenges).post(handlers::create_challenge),
        )
        .route(
            "/challenges/{id}/participants",
            get(handlers::list_participants).post(handlers::join_challenge),
        )
        // Kitchen endpoints
        .route("/kitchen/report", get(handlers::kitchen_report))
        .route("/kitchen/report.csv", get(handlers::kitchen_report_csv))
        .route("/kitchen/prep-lines", get(handlers::kitchen_prep_lines))
        .route("/openapi.json", get(openapi::openapi_json))
        // Add service as extension for handlers
        .layer(Extension(service))
}
