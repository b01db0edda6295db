// 🌐 REST API - maps HTTP routes onto ExpenseService calls
//
// Absent records become 404, validation and bad month pairs become 400,
// a monthly total past the decimal range becomes 422.
// Successful bodies are the records themselves (no envelope).

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::{ExpenseError, FieldError};
use crate::model::{Expense, ExpenseInput, ExpenseRequest};
use crate::service::ExpenseService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    service: Arc<ExpenseService>,
}

impl AppState {
    pub fn new(service: Arc<ExpenseService>) -> Self {
        AppState { service }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Everything a handler can answer with besides success
#[derive(Debug)]
pub enum ApiError {
    NotFound(u64),
    Expense(ExpenseError),
    /// Body, path or query string could not be parsed
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        ApiError::Expense(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("expense {} not found", id),
                    fields: Vec::new(),
                },
            ),
            ApiError::Expense(err) => {
                warn!(error = %err, "request rejected");
                let fields = err.field_errors().to_vec();
                let (status, error) = match err {
                    ExpenseError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "validation failed".to_string())
                    }
                    ExpenseError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                    ExpenseError::TotalOverflow { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                    }
                };
                (status, ErrorBody { error, fields })
            }
            ApiError::BadRequest(message) => {
                warn!(%message, "malformed request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error: message,
                        fields: Vec::new(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// REQUEST / RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MonthParams {
    year: i32,
    month: u32,
}

#[derive(Debug, Serialize)]
pub struct TotalResponse {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total: Decimal,
}

fn parse_body(body: Result<Json<ExpenseRequest>, JsonRejection>) -> ApiResult<ExpenseInput> {
    let Json(request) = body?;
    Ok(request.validate()?)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

/// POST /api/expenses - Record a new expense
async fn create_expense(
    State(state): State<AppState>,
    body: Result<Json<ExpenseRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let input = parse_body(body)?;
    let expense = state.service.create_expense(input);
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/expenses - List every expense
async fn list_expenses(State(state): State<AppState>) -> Json<Vec<Expense>> {
    Json(state.service.list_all())
}

/// GET /api/expenses/:id - Fetch one expense
async fn get_expense(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Expense>> {
    let Path(id) = id?;
    state
        .service
        .find_by_id(id)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// PUT /api/expenses/:id - Replace an existing expense
async fn update_expense(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<ExpenseRequest>, JsonRejection>,
) -> ApiResult<Json<Expense>> {
    let Path(id) = id?;
    let input = parse_body(body)?;
    state
        .service
        .update_expense(id, input)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// DELETE /api/expenses/:id - Remove an expense
async fn delete_expense(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    if state.service.delete_expense(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// GET /api/expenses/category/:category - Filter by category (case-insensitive)
async fn filter_by_category(
    State(state): State<AppState>,
    category: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<Expense>>> {
    let Path(category) = category?;
    Ok(Json(state.service.filter_by_category(Some(&category))))
}

/// GET /api/expenses/month?year=Y&month=M - Filter by calendar month
async fn filter_by_month(
    State(state): State<AppState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Expense>>> {
    let Query(params) = params?;
    Ok(Json(state.service.filter_by_month(params.year, params.month)?))
}

/// GET /api/expenses/total-current-month - Sum of this month's expenses
async fn total_current_month(State(state): State<AppState>) -> ApiResult<Json<TotalResponse>> {
    let total = state.service.total_for_current_month()?;
    Ok(Json(TotalResponse { total }))
}

// ============================================================================
// Router
// ============================================================================

/// Build the full application router around a shared service
pub fn router(service: Arc<ExpenseService>) -> Router {
    let expense_routes = Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/total-current-month", get(total_current_month))
        .route("/month", get(filter_by_month))
        .route("/category/:category", get(filter_by_category))
        .route(
            "/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        );

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .nest("/expenses", expense_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(AppState::new(service))
}
