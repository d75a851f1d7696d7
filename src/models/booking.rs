//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, el enum de estado del ciclo de vida
//! y el método de pago. Mapea exactamente al schema PostgreSQL con primary key 'id'.
//!
//! El estado solo se muta a través de las operaciones de transición del
//! controller; ningún endpoint genérico puede escribir `status`, `driver_id`,
//! `vehicle_id`, timestamps ni ratings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

/// Estado del booking - mapea al ENUM booking_status
///
/// Máquina de estados: PENDING → ACCEPTED → IN_PROGRESS → COMPLETED,
/// con CANCELLED alcanzable desde PENDING, ACCEPTED e IN_PROGRESS.
/// COMPLETED y CANCELLED son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Accepted => "ACCEPTED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Un estado terminal no admite ninguna transición posterior
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Aristas legales de la máquina de estados
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Accepted, InProgress)
                | (InProgress, Completed)
                | (Pending, Cancelled)
                | (Accepted, Cancelled)
                | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Método de pago - mapea al ENUM payment_method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_method", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Wallet,
    Upi,
}

/// Booking principal - mapea exactamente a la tabla bookings
///
/// `driver_id` y `vehicle_id` se escriben una única vez, en la transición
/// a ACCEPTED, y no cambian después.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Accepted));
        assert!(BookingStatus::Accepted.can_transition_to(BookingStatus::InProgress));
        assert!(BookingStatus::InProgress.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_cancellation_edges() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Accepted.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::InProgress.can_transition_to(BookingStatus::Cancelled));
        // COMPLETED no es cancelable
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn test_no_skipping_or_backward_transitions() {
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::InProgress));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Accepted.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Accepted.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::InProgress.can_transition_to(BookingStatus::Accepted));
    }

    #[test]
    fn test_terminal_states_have_no_successors() {
        use BookingStatus::*;
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Pending, Accepted, InProgress, Completed, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(BookingStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(BookingStatus::Pending.to_string(), "PENDING");
        assert_eq!(
            serde_json::to_value(BookingStatus::InProgress).unwrap(),
            serde_json::json!("IN_PROGRESS")
        );
    }
}
