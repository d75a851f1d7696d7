//! Modelo de Vehicle
//!
//! Vehículo registrado por un conductor. Mapea exactamente a la tabla vehicles.
//! `is_verified` es una bandera del sistema, nunca la escribe el cliente.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_number: String,
    pub brand: String,
    pub model: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}
