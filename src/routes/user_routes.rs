//! Rutas de perfil de rider

use axum::{
    extract::State,
    middleware,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, rider_only_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile).patch(update_profile))
        .route_layer(middleware::from_fn(rider_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.get_profile(user.id).await?;
    Ok(Json(response))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update_profile(user.id, request).await?;
    Ok(Json(response))
}
