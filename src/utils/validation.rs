//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs con `#[validate(custom = ...)]`.

use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Precio de vehículo: decimal no negativo con como máximo 2 decimales
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)?;
    if value.normalize().scale() > 2 {
        let mut error = ValidationError::new("price_scale");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max_decimals".into(), &2);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Toyota").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(5).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::from(250_000_000)).is_ok());
        assert!(validate_price(&Decimal::from_str("199.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("199.900").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("199.999").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("-1").unwrap()).is_err());
    }
}
