//! Controller de autenticación
//!
//! Registro y login de riders y drivers. Hash de contraseñas con bcrypt y
//! emisión de JWT con id + rol en los claims.

use crate::dto::auth_dto::{
    DriverAuthResponse, LoginRequest, RegisterDriverRequest, RegisterUserRequest, UserAuthResponse,
};
use crate::models::auth::Role;
use crate::models::driver::Driver;
use crate::models::user::User;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AuthController {
    users: UserRepository,
    drivers: DriverRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> Result<UserAuthResponse, AppError> {
        request.validate()?;

        if self.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            full_name: request.full_name,
            email: request.email,
            phone_number: request.phone_number,
            password_hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let saved = self.users.create(&user).await?;
        let token = generate_token(saved.id, Role::Rider, &self.jwt_config)?;

        Ok(UserAuthResponse {
            message: "User Registration Success".to_string(),
            token,
            role: Role::Rider,
            user: saved.into(),
        })
    }

    pub async fn register_driver(
        &self,
        request: RegisterDriverRequest,
    ) -> Result<DriverAuthResponse, AppError> {
        request.validate()?;

        if request.password != request.confirm_password {
            return Err(AppError::BadRequest("Las contraseñas no coinciden".to_string()));
        }

        if self.drivers.email_exists(&request.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        if self.drivers.license_exists(&request.driver_license_number).await? {
            return Err(AppError::Conflict(
                "El número de licencia ya está registrado".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let driver = Driver {
            id: Uuid::new_v4(),
            full_name: request.full_name,
            email: request.email,
            phone_number: request.phone_number,
            password_hash,
            driver_license_number: request.driver_license_number,
            years_of_experience: request.years_of_experience,
            licensed_since: request.licensed_since,
            total_trips_completed: 0,
            average_rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let saved = self.drivers.create(&driver).await?;
        let token = generate_token(saved.id, Role::Driver, &self.jwt_config)?;

        Ok(DriverAuthResponse {
            message: "Driver Registration Success".to_string(),
            token,
            role: Role::Driver,
            driver: saved.into(),
        })
    }

    pub async fn login_user(&self, request: LoginRequest) -> Result<UserAuthResponse, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, Role::Rider, &self.jwt_config)?;

        Ok(UserAuthResponse {
            message: "Login Success".to_string(),
            token,
            role: Role::Rider,
            user: user.into(),
        })
    }

    pub async fn login_driver(&self, request: LoginRequest) -> Result<DriverAuthResponse, AppError> {
        request.validate()?;

        let driver = self
            .drivers
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &driver.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(driver.id, Role::Driver, &self.jwt_config)?;

        Ok(DriverAuthResponse {
            message: "Login Success".to_string(),
            token,
            role: Role::Driver,
            driver: driver.into(),
        })
    }
}
