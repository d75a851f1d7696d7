//! DTOs de vehicle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 4, max = 20))]
    pub vehicle_number: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,
}

/// Request para actualizar un vehículo.
/// `is_verified` es bandera del sistema y no es actualizable por el cliente.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 4, max = 20))]
    pub vehicle_number: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_number: String,
    pub brand: String,
    pub model: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            driver_id: vehicle.driver_id,
            vehicle_number: vehicle.vehicle_number,
            brand: vehicle.brand,
            model: vehicle.model,
            is_verified: vehicle.is_verified,
            created_at: vehicle.created_at,
        }
    }
}
