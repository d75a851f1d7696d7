//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::driver_dto::DriverResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::auth::Role;

/// Request de registro de rider
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 2, max = 255))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone_number: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Request de registro de driver
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDriverRequest {
    #[validate(length(min = 2, max = 255))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone_number: String,

    #[validate(length(min = 5, max = 50))]
    pub driver_license_number: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    pub confirm_password: String,

    #[validate(range(min = 0, max = 70))]
    pub years_of_experience: Option<i32>,

    pub licensed_since: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request de login (riders y drivers)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response de registro/login de rider
#[derive(Debug, Serialize)]
pub struct UserAuthResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
    pub user: UserResponse,
}

/// Response de registro/login de driver
#[derive(Debug, Serialize)]
pub struct DriverAuthResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
    pub driver: DriverResponse,
}
