//! Modelos de datos
//!
//! Structs que mapean las tablas de PostgreSQL y los enums cerrados
//! que reemplazan a las columnas de estado en texto libre.

use thiserror::Error;

/// Valor de texto que no corresponde a ninguna variante conocida
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Enum persistido como texto: la representación en BD y en JSON es el
/// nombre de la variante.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::models::UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub mod account;
pub mod inquiry;
pub mod test_drive;
pub mod transaction;
pub mod vehicle;
pub mod wishlist;

#[cfg(test)]
mod tests {
    use super::transaction::PaymentMethod;
    use super::vehicle::VehicleStatus;

    #[test]
    fn test_text_enum_round_trips_through_str() {
        for status in VehicleStatus::ALL {
            assert_eq!(status.as_str().parse::<VehicleStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_text_enum_rejects_unknown_and_case_variants() {
        let err = "bank_transfer".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.kind, "PaymentMethod");
        assert_eq!(err.value, "bank_transfer");
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_text_enum_serializes_as_variant_name() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"BankTransfer\"");
    }
}
