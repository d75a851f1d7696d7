//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que `validator` no cubre con sus atributos derive.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar un par latitud/longitud
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        return Err(error);
    }
    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        return Err(error);
    }
    Ok(())
}

/// Validar que un monto sea no negativo
pub fn validate_fare(value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut error = ValidationError::new("fare");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(9.93, 76.26).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_validate_fare() {
        assert!(validate_fare(Decimal::new(10050, 2)).is_ok());
        assert!(validate_fare(Decimal::ZERO).is_ok());
        assert!(validate_fare(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("12345").is_err());
    }
}
