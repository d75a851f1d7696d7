//! Rutas de autenticación (públicas)

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    DriverAuthResponse, LoginRequest, RegisterDriverRequest, RegisterUserRequest, UserAuthResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register_user))
        .route("/user/login", post(login_user))
        .route("/driver/register", post(register_driver))
        .route("/driver/login", post(login_driver))
}

async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserAuthResponse>), AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login_user(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserAuthResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login_user(request).await?;
    Ok(Json(response))
}

async fn register_driver(
    State(state): State<AppState>,
    Json(request): Json<RegisterDriverRequest>,
) -> Result<(StatusCode, Json<DriverAuthResponse>), AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.register_driver(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login_driver(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<DriverAuthResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login_driver(request).await?;
    Ok(Json(response))
}
