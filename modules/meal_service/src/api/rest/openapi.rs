//! OpenAPI components document

use super::dto::*;
use super::error::Problem;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meal Service API",
        description = "Tiers, menus, weekly orders and kitchen reports"
    ),
    components(schemas(
        Problem,
        MealCategoryDto,
        WeekHalfDto,
        HalfAvailabilityDto,
        OrderStatusDto,
        MenuSourceDto,
        TierDto,
        TierRequest,
        MealPlanDto,
        PreferencesDto,
        CustomerDto,
        RegisterCustomerRequest,
        UpdatePreferencesRequest,
        AllowanceDto,
        MenuItemDto,
        MenuItemRequest,
        MenuDto,
        WeeklyMenuEntryDto,
        WeeklyMenuRequest,
        WeeklyMenuDto,
        OrderLineDto,
        OrderSubmissionRequest,
        OrderItemDto,
        OrderTotalsDto,
        OrderDto,
        OrderQuoteDto,
        UpdateOrderStatusRequest,
        ChallengeDto,
        ChallengeRequest,
        JoinChallengeRequest,
        ParticipantDto,
        KitchenMealDto,
        KitchenTierDto,
        KitchenReportDto,
        KitchenOrderDto,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
