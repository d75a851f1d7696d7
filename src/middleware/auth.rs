//! Middleware de autenticación JWT
//!
//! Valida el token Bearer, resuelve `(id, rol)` del caller y lo inyecta como
//! extension de la request. Los guards de rol rechazan el acceso antes de que
//! corra cualquier lógica de negocio; los controllers reciben la identidad
//! como parámetro explícito desde los handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::auth::Role,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Identidad autenticada que se inyecta en las requests
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: Role,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    let role = Role::from_str(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Rol inválido en el token".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser { id, role });

    Ok(next.run(request).await)
}

/// Guard para rutas exclusivas de riders
pub async fn rider_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != Role::Rider {
        return Err(AppError::Forbidden("Se requiere rol RIDER".to_string()));
    }

    Ok(next.run(request).await)
}

/// Guard para rutas exclusivas de drivers
pub async fn driver_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != Role::Driver {
        return Err(AppError::Forbidden("Se requiere rol DRIVER".to_string()));
    }

    Ok(next.run(request).await)
}
