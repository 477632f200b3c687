use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{
    domain::{
        form::{ExpenseDraft, INVALID_INPUT_MESSAGE},
        models::ExpenseId,
    },
    infrastructure::state::AppState,
    services::{
        errors::ServiceError,
        expenses::{ExpenseService, SubmitTarget},
        screens::{AllExpensesScreen, RecentExpensesScreen, ScreenState},
    },
};

type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn router() -> Router {
    Router::new()
        .route("/", get(all_expenses).post(create_expense))
        .route("/recent", get(recent_expenses))
        .route("/:id", put(update_expense).delete(delete_expense))
        .route("/:id/form", get(edit_form))
}

/// Raw text exactly as typed into the expense form.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl ExpenseForm {
    fn into_draft(self) -> ExpenseDraft {
        ExpenseDraft::from_inputs(&self.amount, &self.date, &self.description)
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub today: Option<NaiveDate>,
}

async fn recent_expenses(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<ScreenState>, ApiError> {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    let screen = RecentExpensesScreen::new(state);
    let view = screen.mount(today).await.map_err(to_response)?;

    match view {
        ScreenState::Error { message } => Err((
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "error": message })),
        )),
        view => Ok(Json(view)),
    }
}

async fn all_expenses(Extension(state): Extension<Arc<AppState>>) -> Json<ScreenState> {
    Json(AllExpensesScreen::new(state).render())
}

async fn edit_form(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = ExpenseService::new(state);
    let draft = service
        .open_form(Some(&ExpenseId::new(id)))
        .map_err(to_response)?;
    Ok(Json(serde_json::json!({ "draft": draft })))
}

async fn create_expense(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<ExpenseForm>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let service = ExpenseService::new(state);
    let expense = service
        .submit(payload.into_draft(), SubmitTarget::Create)
        .await
        .map_err(to_response)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "expense": expense })),
    ))
}

async fn update_expense(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = ExpenseService::new(state);
    let expense = service
        .submit(payload.into_draft(), SubmitTarget::Update(ExpenseId::new(id)))
        .await
        .map_err(to_response)?;
    Ok(Json(serde_json::json!({ "expense": expense })))
}

async fn delete_expense(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = ExpenseService::new(state);
    service
        .delete(&ExpenseId::new(id))
        .await
        .map_err(to_response)?;
    Ok(StatusCode::NO_CONTENT)
}

fn to_response(err: ServiceError) -> ApiError {
    let status = err.status_code();
    let body = match err {
        ServiceError::Invalid(draft) => serde_json::json!({
            "error": INVALID_INPUT_MESSAGE,
            "draft": draft,
        }),
        other => serde_json::json!({ "error": other.to_string() }),
    };
    (status, Json(body))
}
