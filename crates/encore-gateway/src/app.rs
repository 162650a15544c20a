use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    add_payment_handler, admin_login_handler, book_handler, create_admin_handler,
    create_employee_handler, delete_booking_handler, delete_employee_handler,
    delete_past_bookings_handler, delete_payment_handler, get_booking_handler,
    get_employee_handler, health_handler, list_bookings_handler, list_employees_handler,
    login_handler, search_bookings_handler,
};
use crate::state::{AppState, Store};

pub struct App {}

impl App {
    pub fn router<S: Store>(state: AppState<S>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/book", post(book_handler::<S>))
                    .route(
                        "/booking/{reference}",
                        get(get_booking_handler::<S>).delete(delete_booking_handler::<S>),
                    )
                    .route("/bookings", get(list_bookings_handler::<S>))
                    .route("/bookings/past", delete(delete_past_bookings_handler::<S>))
                    .route("/bookings/phone/{phone}", get(search_bookings_handler::<S>))
                    .route("/login", post(login_handler::<S>))
                    .route("/admin", post(create_admin_handler::<S>))
                    .route("/admin/login", post(admin_login_handler::<S>))
                    .route(
                        "/employees",
                        post(create_employee_handler::<S>).get(list_employees_handler::<S>),
                    )
                    .route(
                        "/employees/{username}",
                        get(get_employee_handler::<S>).delete(delete_employee_handler::<S>),
                    )
                    .route(
                        "/employees/{username}/payments",
                        post(add_payment_handler::<S>),
                    )
                    .route(
                        "/employees/{username}/payments/{payment}",
                        delete(delete_payment_handler::<S>),
                    ),
            )
            .fallback(crate::error::not_found_handler)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}
