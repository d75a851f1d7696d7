//! Repositorio de vehicles

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        driver_id: Uuid,
        vehicle_number: &str,
        brand: &str,
        model: &str,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, driver_id, vehicle_number, brand, model, is_verified, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(vehicle_number)
        .bind(brand)
        .bind(model)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE driver_id = $1 ORDER BY created_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn vehicle_number_exists(
        &self,
        vehicle_number: &str,
        driver_id: Uuid,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE vehicle_number = $1 AND driver_id = $2)",
        )
        .bind(vehicle_number)
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        driver_id: Uuid,
        vehicle_number: Option<&str>,
        brand: Option<&str>,
        model: Option<&str>,
    ) -> Result<Vehicle, AppError> {
        // Verificar que pertenece al driver
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if current.driver_id != driver_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this driver".to_string(),
            ));
        }

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_number = COALESCE($2, vehicle_number),
                brand = COALESCE($3, brand),
                model = COALESCE($4, model)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_number)
        .bind(brand)
        .bind(model)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid, driver_id: Uuid) -> Result<(), AppError> {
        // Verificar que pertenece al driver
        let vehicle = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.driver_id != driver_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this driver".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
