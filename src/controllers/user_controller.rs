//! Controller de perfil de rider

use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .update_profile(id, request.full_name.as_deref(), request.phone_number.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Perfil actualizado exitosamente".to_string(),
        ))
    }
}
