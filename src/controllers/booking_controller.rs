//! Controller del ciclo de vida de bookings
//!
//! Única autoridad sobre las transiciones de estado. Cada operación recibe la
//! identidad del caller de forma explícita desde la capa de rutas; aquí no se
//! lee ningún estado ambiental.
//!
//! Las precondiciones de estado se evalúan dentro del UPDATE condicional del
//! repositorio; cuando el update no devuelve fila, este controller relee el
//! booking para responder 404 (no existe), 403 (no es el dueño) o 409 (estado
//! inválido, con el estado actual en la respuesta).

use crate::dto::booking_dto::{
    AcceptBookingRequest, BookingResponse, CancelBookingRequest, CompleteBookingRequest,
    CreateBookingRequest, RateBookingRequest, UpdateBookingRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Role;
use crate::models::booking::{Booking, BookingStatus, PaymentMethod};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{invalid_state_error, AppError};
use crate::utils::validation::{validate_coordinates, validate_fare};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct BookingController {
    bookings: BookingRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Crear un booking nuevo (rider). Estado inicial: PENDING.
    pub async fn create(
        &self,
        rider_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        let pickup = request
            .pickup
            .ok_or_else(|| AppError::BadRequest("La ubicación de origen es requerida".to_string()))?;
        let dropoff = request
            .dropoff
            .ok_or_else(|| AppError::BadRequest("La ubicación de destino es requerida".to_string()))?;
        let estimated_fare = request
            .estimated_fare
            .ok_or_else(|| AppError::BadRequest("La tarifa estimada es requerida".to_string()))?;

        validate_coordinates(pickup.latitude, pickup.longitude)
            .map_err(|_| AppError::BadRequest("Las coordenadas de origen son inválidas".to_string()))?;
        validate_coordinates(dropoff.latitude, dropoff.longitude)
            .map_err(|_| AppError::BadRequest("Las coordenadas de destino son inválidas".to_string()))?;
        validate_fare(estimated_fare)
            .map_err(|_| AppError::BadRequest("La tarifa estimada no puede ser negativa".to_string()))?;
        if let Some(distance) = request.estimated_distance {
            validate_fare(distance).map_err(|_| {
                AppError::BadRequest("La distancia estimada no puede ser negativa".to_string())
            })?;
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            rider_id,
            driver_id: None,
            vehicle_id: None,
            pickup_location: pickup.address,
            pickup_latitude: pickup.latitude,
            pickup_longitude: pickup.longitude,
            dropoff_location: dropoff.address,
            dropoff_latitude: dropoff.latitude,
            dropoff_longitude: dropoff.longitude,
            status: BookingStatus::Pending,
            requested_at: Utc::now(),
            started_at: None,
            ended_at: None,
            estimated_distance: request.estimated_distance,
            estimated_fare,
            actual_distance: None,
            actual_fare: None,
            payment_method: request.payment_method.unwrap_or(PaymentMethod::Cash),
            rider_notes: request.rider_notes,
            driver_notes: None,
            rider_rating: None,
            rider_review: None,
            driver_rating: None,
            driver_review: None,
            is_completed: false,
        };

        let created = self.bookings.create(&booking).await?;

        Ok(ApiResponse::success_with_message(
            created.into(),
            "Booking creado exitosamente".to_string(),
        ))
    }

    /// Bookings PENDING disponibles para drivers, más recientes primero
    pub async fn list_pending(&self) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.bookings.find_pending().await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Bookings del rider, más recientes primero
    pub async fn list_for_rider(&self, rider_id: Uuid) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.bookings.find_by_rider(rider_id).await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Bookings del driver, más recientes primero
    pub async fn list_for_driver(&self, driver_id: Uuid) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.bookings.find_by_driver(driver_id).await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Obtener un booking por id, solo para sus dueños
    pub async fn get_by_id(
        &self,
        id: Uuid,
        caller: &AuthenticatedUser,
    ) -> Result<BookingResponse, AppError> {
        let booking = self.fetch_or_not_found(id).await?;
        self.ensure_owner(&booking, caller)?;
        Ok(booking.into())
    }

    /// PENDING → ACCEPTED. El driver queda asignado junto con su vehículo;
    /// si dos drivers aceptan a la vez, exactamente uno gana.
    pub async fn accept(
        &self,
        id: Uuid,
        driver_id: Uuid,
        request: AcceptBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.driver_id != driver_id {
            return Err(AppError::Forbidden(
                "Vehicle does not belong to this driver".to_string(),
            ));
        }

        match self.bookings.accept(id, driver_id, request.vehicle_id).await? {
            Some(booking) => Ok(ApiResponse::success_with_message(
                booking.into(),
                "Booking aceptado exitosamente".to_string(),
            )),
            None => {
                let current = self.fetch_or_not_found(id).await?;
                Err(invalid_state_error(
                    current.status,
                    "Booking is not in PENDING status",
                ))
            }
        }
    }

    /// ACCEPTED → IN_PROGRESS, solo por el driver asignado
    pub async fn start(
        &self,
        id: Uuid,
        driver_id: Uuid,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        match self.bookings.start(id, driver_id, Utc::now()).await? {
            Some(booking) => Ok(ApiResponse::success_with_message(
                booking.into(),
                "Carrera iniciada".to_string(),
            )),
            None => {
                let current = self.fetch_or_not_found(id).await?;
                if current.driver_id != Some(driver_id) {
                    return Err(AppError::Forbidden(
                        "You are not the assigned driver for this booking".to_string(),
                    ));
                }
                Err(invalid_state_error(
                    current.status,
                    "Booking must be ACCEPTED before starting ride",
                ))
            }
        }
    }

    /// IN_PROGRESS → COMPLETED, con actuals opcionales. Incrementa el
    /// contador de viajes del driver.
    pub async fn complete(
        &self,
        id: Uuid,
        driver_id: Uuid,
        request: CompleteBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        if let Some(fare) = request.actual_fare {
            validate_fare(fare).map_err(|_| {
                AppError::BadRequest("La tarifa final no puede ser negativa".to_string())
            })?;
        }
        if let Some(distance) = request.actual_distance {
            validate_fare(distance).map_err(|_| {
                AppError::BadRequest("La distancia final no puede ser negativa".to_string())
            })?;
        }

        match self
            .bookings
            .complete(id, driver_id, Utc::now(), request.actual_distance, request.actual_fare)
            .await?
        {
            Some(booking) => {
                // Estadística best-effort; sin transacción cruzada entre entidades
                if let Err(e) = self.drivers.increment_trips_completed(driver_id).await {
                    tracing::warn!(
                        "No se pudo actualizar total_trips_completed del driver {}: {}",
                        driver_id,
                        e
                    );
                }

                Ok(ApiResponse::success_with_message(
                    booking.into(),
                    "Carrera completada".to_string(),
                ))
            }
            None => {
                let current = self.fetch_or_not_found(id).await?;
                if current.driver_id != Some(driver_id) {
                    return Err(AppError::Forbidden(
                        "You are not the assigned driver for this booking".to_string(),
                    ));
                }
                Err(invalid_state_error(
                    current.status,
                    "Ride must be IN_PROGRESS to complete",
                ))
            }
        }
    }

    /// Cancelación por cualquiera de los dueños mientras el booking no sea
    /// terminal. El motivo queda en las notas del que cancela.
    pub async fn cancel(
        &self,
        id: Uuid,
        caller: &AuthenticatedUser,
        request: CancelBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;
        let reason = request.reason.as_deref();

        let updated = match caller.role {
            Role::Rider => self.bookings.cancel_by_rider(id, caller.id, reason).await?,
            Role::Driver => self.bookings.cancel_by_driver(id, caller.id, reason).await?,
        };

        match updated {
            Some(booking) => Ok(ApiResponse::success_with_message(
                booking.into(),
                "Booking cancelado".to_string(),
            )),
            None => {
                let current = self.fetch_or_not_found(id).await?;
                self.ensure_owner(&current, caller)?;
                Err(invalid_state_error(
                    current.status,
                    "Cannot cancel COMPLETED or already CANCELLED booking",
                ))
            }
        }
    }

    /// Calificación sobre un booking COMPLETED. Cada parte califica una sola
    /// vez; el segundo intento se rechaza.
    pub async fn rate(
        &self,
        id: Uuid,
        caller: &AuthenticatedUser,
        request: RateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;
        let comment = request.comment.as_deref();

        let updated = match caller.role {
            Role::Rider => {
                self.bookings
                    .rate_by_rider(id, caller.id, request.rating, comment)
                    .await?
            }
            Role::Driver => {
                self.bookings
                    .rate_by_driver(id, caller.id, request.rating, comment)
                    .await?
            }
        };

        match updated {
            Some(booking) => {
                // El rating del rider alimenta el promedio del driver
                if caller.role == Role::Rider {
                    if let Some(driver_id) = booking.driver_id {
                        if let Err(e) = self.drivers.refresh_average_rating(driver_id).await {
                            tracing::warn!(
                                "No se pudo recalcular average_rating del driver {}: {}",
                                driver_id,
                                e
                            );
                        }
                    }
                }

                Ok(ApiResponse::success_with_message(
                    booking.into(),
                    "Calificación registrada".to_string(),
                ))
            }
            None => {
                let current = self.fetch_or_not_found(id).await?;
                self.ensure_owner(&current, caller)?;

                if current.status != BookingStatus::Completed {
                    return Err(invalid_state_error(
                        current.status,
                        "Can only rate COMPLETED bookings",
                    ));
                }

                // Estado correcto y dueño correcto: ya había calificado
                Err(invalid_state_error(
                    current.status,
                    "Booking has already been rated by this party",
                ))
            }
        }
    }

    /// Update genérico restringido: notas, método de pago y tarifa estimada
    /// pre-aceptación. `status`, `driver_id`, `vehicle_id`, timestamps y
    /// ratings quedan fuera del set de campos por diseño.
    pub async fn update_details(
        &self,
        id: Uuid,
        caller: &AuthenticatedUser,
        request: UpdateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        if let Some(fare) = request.estimated_fare {
            validate_fare(fare).map_err(|_| {
                AppError::BadRequest("La tarifa estimada no puede ser negativa".to_string())
            })?;
        }

        let updated = match caller.role {
            Role::Rider => {
                if request.driver_notes.is_some() {
                    return Err(AppError::Forbidden(
                        "Riders cannot edit driver notes".to_string(),
                    ));
                }
                self.bookings
                    .update_rider_details(
                        id,
                        caller.id,
                        request.rider_notes.as_deref(),
                        request.payment_method,
                        request.estimated_fare,
                    )
                    .await?
            }
            Role::Driver => {
                if request.rider_notes.is_some()
                    || request.payment_method.is_some()
                    || request.estimated_fare.is_some()
                {
                    return Err(AppError::Forbidden(
                        "Drivers can only edit their own notes".to_string(),
                    ));
                }
                let notes = request.driver_notes.as_deref().ok_or_else(|| {
                    AppError::BadRequest("No hay campos para actualizar".to_string())
                })?;
                self.bookings.update_driver_notes(id, caller.id, notes).await?
            }
        };

        match updated {
            Some(booking) => Ok(ApiResponse::success_with_message(
                booking.into(),
                "Booking actualizado exitosamente".to_string(),
            )),
            None => {
                let current = self.fetch_or_not_found(id).await?;
                self.ensure_owner(&current, caller)?;
                // El único predicado restante es la tarifa pre-aceptación
                Err(invalid_state_error(
                    current.status,
                    "Estimated fare can only be changed while the booking is PENDING",
                ))
            }
        }
    }

    async fn fetch_or_not_found(&self, id: Uuid) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id '{}' not found", id)))
    }

    fn ensure_owner(&self, booking: &Booking, caller: &AuthenticatedUser) -> Result<(), AppError> {
        let is_owner = match caller.role {
            Role::Rider => booking.rider_id == caller.id,
            Role::Driver => booking.driver_id == Some(caller.id),
        };

        if !is_owner {
            return Err(AppError::Forbidden(
                "You do not have access to this booking".to_string(),
            ));
        }

        Ok(())
    }
}
