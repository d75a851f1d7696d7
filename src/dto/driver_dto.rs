//! DTOs de driver

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::Driver;

/// Response de driver para la API - sin password
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub driver_license_number: String,
    pub years_of_experience: Option<i32>,
    pub licensed_since: Option<DateTime<Utc>>,
    pub total_trips_completed: i32,
    pub average_rating: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Request para actualizar el perfil del driver.
/// `total_trips_completed` y `average_rating` los mantiene el sistema y
/// quedan fuera del set de campos actualizables.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 255))]
    pub full_name: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone_number: Option<String>,

    #[validate(range(min = 0, max = 70))]
    pub years_of_experience: Option<i32>,

    pub licensed_since: Option<DateTime<Utc>>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            full_name: driver.full_name,
            email: driver.email,
            phone_number: driver.phone_number,
            driver_license_number: driver.driver_license_number,
            years_of_experience: driver.years_of_experience,
            licensed_since: driver.licensed_since,
            total_trips_completed: driver.total_trips_completed,
            average_rating: driver.average_rating,
            created_at: driver.created_at,
        }
    }
}
