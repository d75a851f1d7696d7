//! Repositorio de drivers
//!
//! Además del CRUD de perfil, mantiene las estadísticas que alimenta el ciclo
//! de vida de los bookings: viajes completados y rating promedio.

use crate::models::driver::Driver;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: &Driver) -> Result<Driver, AppError> {
        let created = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                id, full_name, email, phone_number, password_hash,
                driver_license_number, years_of_experience, licensed_since,
                total_trips_completed, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $9)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.full_name)
        .bind(&driver.email)
        .bind(&driver.phone_number)
        .bind(&driver.password_hash)
        .bind(&driver.driver_license_number)
        .bind(driver.years_of_experience)
        .bind(driver.licensed_since)
        .bind(driver.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM drivers WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn license_exists(&self, license_number: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE driver_license_number = $1)",
        )
        .bind(license_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        phone_number: Option<&str>,
        years_of_experience: Option<i32>,
        licensed_since: Option<DateTime<Utc>>,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET full_name = COALESCE($2, full_name),
                phone_number = COALESCE($3, phone_number),
                years_of_experience = COALESCE($4, years_of_experience),
                licensed_since = COALESCE($5, licensed_since),
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(phone_number)
        .bind(years_of_experience)
        .bind(licensed_since)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    /// Incrementar el contador de viajes completados
    pub async fn increment_trips_completed(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE drivers
            SET total_trips_completed = total_trips_completed + 1, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Recalcular el rating promedio a partir de las calificaciones de riders
    pub async fn refresh_average_rating(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE drivers
            SET average_rating = (
                SELECT AVG(rider_rating)::numeric(3, 2)
                FROM bookings
                WHERE driver_id = $1 AND rider_rating IS NOT NULL
            ),
                updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
