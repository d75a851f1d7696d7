//! Repositorios - acceso a datos vía sqlx

pub mod booking_repository;
pub mod driver_repository;
pub mod user_repository;
pub mod vehicle_repository;
