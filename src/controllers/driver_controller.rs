//! Controller de perfil de driver

use crate::dto::driver_dto::{DriverResponse, UpdateDriverRequest};
use crate::dto::ApiResponse;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver no encontrado".to_string()))?;

        Ok(driver.into())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let driver = self
            .repository
            .update_profile(
                id,
                request.full_name.as_deref(),
                request.phone_number.as_deref(),
                request.years_of_experience,
                request.licensed_since,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Driver no encontrado".to_string()))?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Perfil actualizado exitosamente".to_string(),
        ))
    }
}
