//! Repositorio de bookings
//!
//! Todas las transiciones guardadas son updates condicionales de un solo
//! round-trip: el predicado sobre `status` (y sobre el dueño) viaja en el
//! WHERE, de modo que dos callers compitiendo por la misma transición nunca
//! pueden pisarse. El que pierde recibe 0 filas y el controller diagnostica.

use crate::models::booking::{Booking, PaymentMethod};
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, rider_id, pickup_location, pickup_latitude, pickup_longitude,
                dropoff_location, dropoff_latitude, dropoff_longitude,
                status, requested_at, estimated_distance, estimated_fare,
                payment_method, rider_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'PENDING', $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.rider_id)
        .bind(&booking.pickup_location)
        .bind(booking.pickup_latitude)
        .bind(booking.pickup_longitude)
        .bind(&booking.dropoff_location)
        .bind(booking.dropoff_latitude)
        .bind(booking.dropoff_longitude)
        .bind(booking.requested_at)
        .bind(booking.estimated_distance)
        .bind(booking.estimated_fare)
        .bind(booking.payment_method)
        .bind(&booking.rider_notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_pending(&self) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status = 'PENDING' ORDER BY requested_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_rider(&self, rider_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE rider_id = $1 ORDER BY requested_at DESC",
        )
        .bind(rider_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE driver_id = $1 ORDER BY requested_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// PENDING → ACCEPTED. Fija driver y vehículo una única vez; si dos
    /// drivers compiten, exactamente uno recibe la fila.
    pub async fn accept(
        &self,
        id: Uuid,
        driver_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'ACCEPTED', driver_id = $2, vehicle_id = $3
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// ACCEPTED → IN_PROGRESS, solo para el driver asignado
    pub async fn start(
        &self,
        id: Uuid,
        driver_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'IN_PROGRESS', started_at = $3
            WHERE id = $1 AND driver_id = $2 AND status = 'ACCEPTED'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(started_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// IN_PROGRESS → COMPLETED, solo para el driver asignado
    pub async fn complete(
        &self,
        id: Uuid,
        driver_id: Uuid,
        ended_at: DateTime<Utc>,
        actual_distance: Option<Decimal>,
        actual_fare: Option<Decimal>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'COMPLETED',
                ended_at = $3,
                is_completed = TRUE,
                actual_distance = COALESCE($4, actual_distance),
                actual_fare = COALESCE($5, actual_fare)
            WHERE id = $1 AND driver_id = $2 AND status = 'IN_PROGRESS'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(ended_at)
        .bind(actual_distance)
        .bind(actual_fare)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Cancelación por el rider dueño; el motivo queda en sus notas
    pub async fn cancel_by_rider(
        &self,
        id: Uuid,
        rider_id: Uuid,
        reason: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'CANCELLED', rider_notes = COALESCE($3, rider_notes)
            WHERE id = $1 AND rider_id = $2 AND status NOT IN ('COMPLETED', 'CANCELLED')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rider_id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Cancelación por el driver asignado; el motivo queda en sus notas
    pub async fn cancel_by_driver(
        &self,
        id: Uuid,
        driver_id: Uuid,
        reason: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'CANCELLED', driver_notes = COALESCE($3, driver_notes)
            WHERE id = $1 AND driver_id = $2 AND status NOT IN ('COMPLETED', 'CANCELLED')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Calificación del rider sobre un booking COMPLETED, escribible una sola vez
    pub async fn rate_by_rider(
        &self,
        id: Uuid,
        rider_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET rider_rating = $3, rider_review = $4
            WHERE id = $1 AND rider_id = $2 AND status = 'COMPLETED' AND rider_rating IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rider_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Calificación del driver sobre un booking COMPLETED, escribible una sola vez
    pub async fn rate_by_driver(
        &self,
        id: Uuid,
        driver_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET driver_rating = $3, driver_review = $4
            WHERE id = $1 AND driver_id = $2 AND status = 'COMPLETED' AND driver_rating IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Update genérico del rider: notas, método de pago y, solo mientras el
    /// booking sigue PENDING, la tarifa estimada. El predicado del WHERE hace
    /// cumplir esa condición en el mismo round-trip.
    pub async fn update_rider_details(
        &self,
        id: Uuid,
        rider_id: Uuid,
        rider_notes: Option<&str>,
        payment_method: Option<PaymentMethod>,
        estimated_fare: Option<Decimal>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET rider_notes = COALESCE($3, rider_notes),
                payment_method = COALESCE($4, payment_method),
                estimated_fare = COALESCE($5, estimated_fare)
            WHERE id = $1 AND rider_id = $2
              AND ($5::numeric IS NULL OR status = 'PENDING')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rider_id)
        .bind(rider_notes)
        .bind(payment_method)
        .bind(estimated_fare)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Update genérico del driver: solo sus notas
    pub async fn update_driver_notes(
        &self,
        id: Uuid,
        driver_id: Uuid,
        driver_notes: &str,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET driver_notes = $3
            WHERE id = $1 AND driver_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(driver_notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }
}
