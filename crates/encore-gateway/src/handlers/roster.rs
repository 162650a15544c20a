use crate::error::Result;
use crate::model::{
    AddPaymentRequest, AdminResponse, CreateAdminRequest, CreateEmployeeRequest,
    EmployeeDetailResponse, EmployeeResponse, PaymentResponse,
};
use crate::state::{AppState, Store};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use encore_core::PaymentId;
use encore_roster::{AdminSignup, EmployeeSignup};

pub async fn create_employee_handler<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>)> {
    let employee = state
        .roster
        .create_employee(EmployeeSignup {
            name: request.name,
            mobile_number: request.mobile_number,
            email: request.email,
            address: request.address,
            total_amount_to_be_paid: request.total_amount_to_be_paid,
            total_amount_paid_in_advance: request.total_amount_paid_in_advance,
            username: request.username,
            password: request.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

pub async fn list_employees_handler<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<EmployeeResponse>>> {
    let employees = state.roster.list_employees().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

pub async fn get_employee_handler<S: Store>(
    Path(username): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Json<EmployeeDetailResponse>> {
    let (employee, payments) = state.roster.employee_detail(&username).await?;
    Ok(Json(EmployeeDetailResponse {
        employee: employee.into(),
        payments: payments.into_iter().map(Into::into).collect(),
    }))
}

/// Removes the employee and every payment it owns in one atomic step.
pub async fn delete_employee_handler<S: Store>(
    Path(username): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<StatusCode> {
    state.roster.remove_employee(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_payment_handler<S: Store>(
    Path(username): Path<String>,
    State(state): State<AppState<S>>,
    Json(request): Json<AddPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>)> {
    let payment = state
        .roster
        .add_payment(&username, request.amount_paid, request.date)
        .await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

pub async fn delete_payment_handler<S: Store>(
    Path((username, payment)): Path<(String, i64)>,
    State(state): State<AppState<S>>,
) -> Result<StatusCode> {
    state
        .roster
        .delete_payment(&username, PaymentId::new(payment))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_admin_handler<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminResponse>)> {
    let admin = state
        .roster
        .create_admin(AdminSignup {
            name: request.name,
            mobile_number: request.mobile_number,
            email: request.email,
            username: request.username,
            password: request.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(admin.into())))
}
