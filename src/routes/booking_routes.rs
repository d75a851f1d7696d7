//! Rutas de bookings
//!
//! Las transiciones de estado solo existen como operaciones nombradas; no hay
//! ningún endpoint capaz de escribir `status` directamente. Los handlers
//! extraen la identidad autenticada y la pasan explícitamente al controller.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    AcceptBookingRequest, BookingResponse, CancelBookingRequest, CompleteBookingRequest,
    CreateBookingRequest, RateBookingRequest, UpdateBookingRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{
    auth_middleware, driver_only_middleware, rider_only_middleware, AuthenticatedUser,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router(state: AppState) -> Router<AppState> {
    let rider_routes = Router::new()
        .route("/", post(create_booking))
        .route("/mine", get(list_my_bookings))
        .route_layer(middleware::from_fn(rider_only_middleware));

    let driver_routes = Router::new()
        .route("/pending", get(list_pending_bookings))
        .route("/driver/mine", get(list_driver_bookings))
        .route("/:id/accept", post(accept_booking))
        .route("/:id/start", post(start_booking))
        .route("/:id/complete", post(complete_booking))
        .route_layer(middleware::from_fn(driver_only_middleware));

    let shared_routes = Router::new()
        .route("/:id", get(get_booking).patch(update_booking))
        .route("/:id/cancel", post(cancel_booking))
        .route("/:id/rate", post(rate_booking));

    Router::new()
        .merge(rider_routes)
        .merge(driver_routes)
        .merge(shared_routes)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// RIDER: crear un booking (estado inicial PENDING)
async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// RIDER: sus bookings, más recientes primero
async fn list_my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list_for_rider(user.id).await?;
    Ok(Json(response))
}

/// DRIVER: bookings PENDING disponibles
async fn list_pending_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list_pending().await?;
    Ok(Json(response))
}

/// DRIVER: sus bookings aceptados/completados
async fn list_driver_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list_for_driver(user.id).await?;
    Ok(Json(response))
}

/// RIDER o DRIVER (dueño): detalle de un booking
async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.get_by_id(id, &user).await?;
    Ok(Json(response))
}

/// DRIVER: aceptar un booking PENDING con uno de sus vehículos
async fn accept_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AcceptBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.accept(id, user.id, request).await?;
    Ok(Json(response))
}

/// DRIVER (asignado): iniciar la carrera
async fn start_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.start(id, user.id).await?;
    Ok(Json(response))
}

/// DRIVER (asignado): completar la carrera
async fn complete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.complete(id, user.id, request).await?;
    Ok(Json(response))
}

/// RIDER o DRIVER (dueño): cancelar mientras no sea terminal
async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.cancel(id, &user, request).await?;
    Ok(Json(response))
}

/// RIDER o DRIVER (dueño): calificar un booking COMPLETED
async fn rate_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.rate(id, &user, request).await?;
    Ok(Json(response))
}

/// RIDER o DRIVER (dueño): update genérico de campos inofensivos
async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update_details(id, &user, request).await?;
    Ok(Json(response))
}
