//! HTTP request handlers - thin layer that delegates to domain service

use super::auth::Caller;
use super::dto::*;
use super::error::{map_domain_error, Problem};
use super::extract::{JsonBody, PathParam, QueryParams};
use crate::contract::{MealError, NewCustomer};
use crate::domain::Service;
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

type ApiResult<T> = Result<Json<ApiResponse<T>>, Problem>;
type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), Problem>;

fn fail(service: &Service) -> impl Fn(MealError) -> Problem + '_ {
    move |error| map_domain_error(error, &service.config().login_url)
}

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

fn created<T>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data))))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ===== Tier Handlers =====

/// List tiers; inactive ones only for admins asking with `?all=true`
pub async fn list_tiers(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    QueryParams(query): QueryParams<ListTiersQuery>,
) -> ApiResult<Vec<TierDto>> {
    let tiers = service
        .list_tiers(query.all && caller.is_admin())
        .await
        .map_err(fail(&service))?;
    ok(tiers.into_iter().map(Into::into).collect())
}

pub async fn get_tier(
    Extension(service): Extension<Arc<Service>>,
    PathParam(tier_id): PathParam<Uuid>,
) -> ApiResult<TierDto> {
    let tier = service.get_tier(tier_id).await.map_err(fail(&service))?;
    ok(tier.into())
}

pub async fn create_tier(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<TierRequest>,
) -> CreatedResult<TierDto> {
    caller.require_admin().map_err(fail(&service))?;
    let tier = service.create_tier(req.into()).await.map_err(fail(&service))?;
    created(tier.into())
}

pub async fn update_tier(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(tier_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<TierRequest>,
) -> ApiResult<TierDto> {
    caller.require_admin().map_err(fail(&service))?;
    let tier = service
        .update_tier(tier_id, req.into())
        .await
        .map_err(fail(&service))?;
    ok(tier.into())
}

// ===== Customer Handlers =====

/// Register the caller's profile; the id comes from the auth header when present
pub async fn register_customer(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<RegisterCustomerRequest>,
) -> CreatedResult<CustomerDto> {
    let customer = service
        .register_customer(NewCustomer {
            id: caller.0.customer_id,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        })
        .await
        .map_err(fail(&service))?;
    created(customer.into())
}

pub async fn get_me(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
) -> ApiResult<CustomerDto> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let customer = service
        .get_customer(customer_id)
        .await
        .map_err(fail(&service))?;
    ok(customer.into())
}

pub async fn update_preferences(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<UpdatePreferencesRequest>,
) -> ApiResult<CustomerDto> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let customer = service
        .update_preferences(customer_id, req.into())
        .await
        .map_err(fail(&service))?;
    ok(customer.into())
}

pub async fn get_allowance(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    QueryParams(query): QueryParams<WeekQuery>,
) -> ApiResult<AllowanceDto> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let allowance = service
        .allowance(customer_id, query.week.unwrap_or_else(today))
        .await
        .map_err(fail(&service))?;
    ok(allowance.into())
}

// ===== Menu Handlers =====

pub async fn get_menu(
    Extension(service): Extension<Arc<Service>>,
    QueryParams(query): QueryParams<WeekQuery>,
) -> ApiResult<MenuDto> {
    let menu = service
        .menu_for_week(query.week.unwrap_or_else(today))
        .await
        .map_err(fail(&service))?;
    ok(menu.into())
}

pub async fn get_menu_item(
    Extension(service): Extension<Arc<Service>>,
    PathParam(item_id): PathParam<Uuid>,
) -> ApiResult<MenuItemDto> {
    let item = service.get_menu_item(item_id).await.map_err(fail(&service))?;
    ok(item.into())
}

pub async fn create_menu_item(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<MenuItemRequest>,
) -> CreatedResult<MenuItemDto> {
    caller.require_admin().map_err(fail(&service))?;
    let item = service
        .create_menu_item(req.into())
        .await
        .map_err(fail(&service))?;
    created(item.into())
}

pub async fn update_menu_item(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(item_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<MenuItemRequest>,
) -> ApiResult<MenuItemDto> {
    caller.require_admin().map_err(fail(&service))?;
    let item = service
        .update_menu_item(item_id, req.into())
        .await
        .map_err(fail(&service))?;
    ok(item.into())
}

pub async fn set_weekly_menu(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(week_start): PathParam<NaiveDate>,
    JsonBody(req): JsonBody<WeeklyMenuRequest>,
) -> ApiResult<WeeklyMenuDto> {
    caller.require_admin().map_err(fail(&service))?;
    let menu = service
        .set_weekly_menu(week_start, req.items.into_iter().map(Into::into).collect())
        .await
        .map_err(fail(&service))?;
    ok(menu.into())
}

// ===== Order Handlers =====

/// The caller's order for the current week; `data` is null when none exists
pub async fn current_order(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
) -> ApiResult<Option<OrderDto>> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let order = service
        .current_order(customer_id, today())
        .await
        .map_err(fail(&service))?;
    ok(order.map(Into::into))
}

pub async fn submit_order(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<OrderSubmissionRequest>,
) -> ApiResult<OrderDto> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let order = service
        .submit_order(customer_id, req.into(), today())
        .await
        .map_err(fail(&service))?;
    ok(order.into())
}

pub async fn quote_order(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<OrderSubmissionRequest>,
) -> ApiResult<OrderQuoteDto> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let quote = service
        .quote_order(customer_id, &req.into(), today())
        .await
        .map_err(fail(&service))?;
    ok(quote.into())
}

pub async fn list_orders(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
) -> ApiResult<Vec<OrderDto>> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let orders = service
        .list_orders(customer_id)
        .await
        .map_err(fail(&service))?;
    ok(orders.into_iter().map(Into::into).collect())
}

pub async fn get_order(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(order_id): PathParam<Uuid>,
) -> ApiResult<OrderDto> {
    if !caller.is_admin() {
        caller.customer_id().map_err(fail(&service))?;
    }
    let order = service
        .get_order(&caller.0, order_id)
        .await
        .map_err(fail(&service))?;
    ok(order.into())
}

pub async fn update_order_status(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(order_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateOrderStatusRequest>,
) -> ApiResult<OrderDto> {
    caller.require_admin().map_err(fail(&service))?;
    let order = service
        .update_order_status(order_id, req.status.into())
        .await
        .map_err(fail(&service))?;
    ok(order.into())
}

// ===== Challenge Handlers =====

pub async fn list_challenges(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Vec<ChallengeDto>> {
    let challenges = service
        .list_active_challenges(today())
        .await
        .map_err(fail(&service))?;
    ok(challenges.into_iter().map(Into::into).collect())
}

pub async fn create_challenge(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    JsonBody(req): JsonBody<ChallengeRequest>,
) -> CreatedResult<ChallengeDto> {
    caller.require_admin().map_err(fail(&service))?;
    let challenge = service
        .create_challenge(req.into())
        .await
        .map_err(fail(&service))?;
    created(challenge.into())
}

pub async fn join_challenge(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(challenge_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<JoinChallengeRequest>,
) -> CreatedResult<ParticipantDto> {
    let customer_id = caller.customer_id().map_err(fail(&service))?;
    let participant = service
        .join_challenge(customer_id, challenge_id, req.tier_id, today())
        .await
        .map_err(fail(&service))?;
    created(participant.into())
}

pub async fn list_participants(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    PathParam(challenge_id): PathParam<Uuid>,
) -> ApiResult<Vec<ParticipantDto>> {
    caller.require_admin().map_err(fail(&service))?;
    let participants = service
        .list_participants(challenge_id)
        .await
        .map_err(fail(&service))?;
    ok(participants.into_iter().map(Into::into).collect())
}

// ===== Kitchen Handlers =====

pub async fn kitchen_report(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    QueryParams(query): QueryParams<WeekQuery>,
) -> ApiResult<KitchenReportDto> {
    caller.require_admin().map_err(fail(&service))?;
    let report = service
        .generate_kitchen_report(query.week.unwrap_or_else(today))
        .await
        .map_err(fail(&service))?;
    ok(report.into())
}

/// CSV download of the kitchen report
pub async fn kitchen_report_csv(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    QueryParams(query): QueryParams<WeekQuery>,
) -> Result<impl IntoResponse, Problem> {
    caller.require_admin().map_err(fail(&service))?;
    let week = crate::domain::week::week_start_for(query.week.unwrap_or_else(today));
    let csv = service
        .kitchen_report_csv(week)
        .await
        .map_err(fail(&service))?;

    let disposition = format!("attachment; filename=\"kitchen-report-{}.csv\"", week);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Prep lines stored by the last report generation
pub async fn kitchen_prep_lines(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    QueryParams(query): QueryParams<WeekQuery>,
) -> ApiResult<Vec<KitchenOrderDto>> {
    caller.require_admin().map_err(fail(&service))?;
    let lines = service
        .kitchen_prep_lines(query.week.unwrap_or_else(today))
        .await
        .map_err(fail(&service))?;
    ok(lines.into_iter().map(Into::into).collect())
}
