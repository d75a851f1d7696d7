//! Controller de vehicles
//!
//! CRUD de la flota de un driver, con verificación de pertenencia.

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        driver_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if self
            .repository
            .vehicle_number_exists(&request.vehicle_number, driver_id)
            .await?
        {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada para este driver".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(driver_id, &request.vehicle_number, &request.brand, &request.model)
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, driver_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.driver_id != driver_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este vehículo".to_string(),
            ));
        }

        Ok(vehicle.into())
    }

    pub async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_driver(driver_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        driver_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(
                id,
                driver_id,
                request.vehicle_number.as_deref(),
                request.brand.as_deref(),
                request.model.as_deref(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, driver_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, driver_id).await?;
        Ok(())
    }
}
