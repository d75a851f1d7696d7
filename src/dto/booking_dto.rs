//! DTOs de booking
//!
//! Los campos `status`, `driver_id`, `vehicle_id`, timestamps y ratings nunca
//! aparecen en un request de actualización genérico; solo las operaciones de
//! transición los escriben.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{Booking, BookingStatus, PaymentMethod};

/// Ubicación estructurada: dirección + coordenadas
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationDto {
    #[validate(length(min = 3, max = 500))]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Request para crear un booking (rider).
/// Origen, destino y tarifa estimada son requeridos; su ausencia se responde
/// como 400 desde el controller, no como rechazo de deserialización.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate]
    pub pickup: Option<LocationDto>,

    #[validate]
    pub dropoff: Option<LocationDto>,

    pub estimated_distance: Option<Decimal>,

    pub estimated_fare: Option<Decimal>,

    pub payment_method: Option<PaymentMethod>,

    #[validate(length(max = 1000))]
    pub rider_notes: Option<String>,
}

/// Request para aceptar un booking (driver)
#[derive(Debug, Deserialize)]
pub struct AcceptBookingRequest {
    pub vehicle_id: Uuid,
}

/// Request para completar una carrera
#[derive(Debug, Deserialize)]
pub struct CompleteBookingRequest {
    pub actual_distance: Option<Decimal>,
    pub actual_fare: Option<Decimal>,
}

/// Request para cancelar un booking
#[derive(Debug, Deserialize, Validate)]
pub struct CancelBookingRequest {
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

/// Request para calificar un booking completado
#[derive(Debug, Deserialize, Validate)]
pub struct RateBookingRequest {
    #[validate(range(min = 0, max = 5))]
    pub rating: i32,

    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// Request de actualización genérica - solo campos inofensivos.
/// `estimated_fare` únicamente es editable mientras el booking sigue PENDING.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    #[validate(length(max = 1000))]
    pub rider_notes: Option<String>,

    #[validate(length(max = 1000))]
    pub driver_notes: Option<String>,

    pub payment_method: Option<PaymentMethod>,

    pub estimated_fare: Option<Decimal>,
}

/// Response de booking para la API
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub pickup_location: String,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub dropoff_location: String,
    pub dropoff_latitude: f64,
    pub dropoff_longitude: f64,
    pub status: BookingStatus,
    pub requested_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub estimated_distance: Option<Decimal>,
    pub estimated_fare: Decimal,
    pub actual_distance: Option<Decimal>,
    pub actual_fare: Option<Decimal>,
    pub payment_method: PaymentMethod,
    pub rider_notes: Option<String>,
    pub driver_notes: Option<String>,
    pub rider_rating: Option<i32>,
    pub rider_review: Option<String>,
    pub driver_rating: Option<i32>,
    pub driver_review: Option<String>,
    pub is_completed: bool,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            rider_id: booking.rider_id,
            driver_id: booking.driver_id,
            vehicle_id: booking.vehicle_id,
            pickup_location: booking.pickup_location,
            pickup_latitude: booking.pickup_latitude,
            pickup_longitude: booking.pickup_longitude,
            dropoff_location: booking.dropoff_location,
            dropoff_latitude: booking.dropoff_latitude,
            dropoff_longitude: booking.dropoff_longitude,
            status: booking.status,
            requested_at: booking.requested_at,
            started_at: booking.started_at,
            ended_at: booking.ended_at,
            estimated_distance: booking.estimated_distance,
            estimated_fare: booking.estimated_fare,
            actual_distance: booking.actual_distance,
            actual_fare: booking.actual_fare,
            payment_method: booking.payment_method,
            rider_notes: booking.rider_notes,
            driver_notes: booking.driver_notes,
            rider_rating: booking.rider_rating,
            rider_review: booking.rider_review,
            driver_rating: booking.driver_rating,
            driver_review: booking.driver_review,
            is_completed: booking.is_completed,
        }
    }
}
