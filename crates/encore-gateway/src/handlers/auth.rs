use crate::error::Result;
use crate::model::{AdminResponse, EmployeeResponse, LoginRequest};
use crate::state::{AppState, Store};
use axum::extract::State;
use axum::Json;

/// Verifies employee credentials and returns the matching profile.
pub async fn login_handler<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<EmployeeResponse>> {
    let employee = state
        .roster
        .verify_employee(&request.username, &request.password)
        .await?;
    Ok(Json(employee.into()))
}

/// Verifies admin credentials and returns the matching profile.
pub async fn admin_login_handler<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AdminResponse>> {
    let admin = state
        .roster
        .verify_admin(&request.username, &request.password)
        .await?;
    Ok(Json(admin.into()))
}
