//! Rutas de perfil de driver

use axum::{
    extract::State,
    middleware,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{DriverResponse, UpdateDriverRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, driver_only_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile).patch(update_profile))
        .route_layer(middleware::from_fn(driver_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DriverResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.get_profile(user.id).await?;
    Ok(Json(response))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.update_profile(user.id, request).await?;
    Ok(Json(response))
}
