//! Modelo de Driver
//!
//! Cuenta de conductor con su bloque de experiencia. Mapea exactamente a la
//! tabla drivers. `total_trips_completed` y `average_rating` los mantiene el
//! sistema a partir del ciclo de vida de los bookings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub driver_license_number: String,
    pub years_of_experience: Option<i32>,
    pub licensed_since: Option<DateTime<Utc>>,
    pub total_trips_completed: i32,
    pub average_rating: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
