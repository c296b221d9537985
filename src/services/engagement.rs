//! Reglas de wishlist, pruebas de manejo y consultas
//!
//! Las tablas de transición replican las reglas del negocio: el administrador
//! puede mover una prueba de manejo o una consulta a cualquier estado; el
//! cliente sólo puede cancelar sus propias pruebas y nunca una completada.

use thiserror::Error;

use crate::models::{account::Role, inquiry::InquiryStatus, test_drive::TestDriveStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngagementError {
    #[error("Vehicle not found")]
    VehicleNotFound,

    #[error("Vehicle already in wishlist")]
    AlreadyInWishlist,

    #[error("Vehicle not found in wishlist")]
    NotInWishlist,

    #[error("Test drive not found")]
    TestDriveNotFound,

    #[error("Inquiry not found")]
    InquiryNotFound,

    #[error("You do not have access to this resource")]
    Forbidden,

    #[error("{0}")]
    InvalidTransition(String),
}

/// Quién pide el cambio de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Owner,
    Admin,
}

/// Tabla de transiciones de una prueba de manejo
pub fn test_drive_transition_allowed(
    actor: Actor,
    from: TestDriveStatus,
    to: TestDriveStatus,
) -> bool {
    match (actor, from, to) {
        (Actor::Admin, _, _) => true,
        (Actor::Owner, TestDriveStatus::Completed, _) => false,
        (Actor::Owner, _, TestDriveStatus::Cancelled) => true,
        (Actor::Owner, _, _) => false,
    }
}

/// Tabla de transiciones de una consulta. Sólo el administrador responde.
pub fn inquiry_transition_allowed(actor: Actor, _from: InquiryStatus, _to: InquiryStatus) -> bool {
    actor == Actor::Admin
}

/// El dueño del registro o un administrador pueden verlo
pub fn ensure_owner_or_admin(
    owner_id: i32,
    requester_id: i32,
    requester_role: Role,
) -> Result<(), EngagementError> {
    if requester_role == Role::Admin || owner_id == requester_id {
        Ok(())
    } else {
        Err(EngagementError::Forbidden)
    }
}

/// Cancelación iniciada por el cliente
pub fn cancel_test_drive(
    owner_id: i32,
    current: TestDriveStatus,
    requester_id: i32,
) -> Result<TestDriveStatus, EngagementError> {
    if owner_id != requester_id {
        return Err(EngagementError::Forbidden);
    }

    if !test_drive_transition_allowed(Actor::Owner, current, TestDriveStatus::Cancelled) {
        return Err(EngagementError::InvalidTransition(format!(
            "Cannot cancel a {} test drive",
            current.as_str().to_lowercase()
        )));
    }

    Ok(TestDriveStatus::Cancelled)
}

/// Cambio de estado de una prueba de manejo hecho por el administrador
pub fn admin_set_test_drive_status(
    current: TestDriveStatus,
    requested: &str,
) -> Result<TestDriveStatus, EngagementError> {
    let next: TestDriveStatus = requested.parse().map_err(|_| {
        EngagementError::InvalidTransition(format!("Invalid test drive status '{}'", requested))
    })?;

    if !test_drive_transition_allowed(Actor::Admin, current, next) {
        return Err(EngagementError::InvalidTransition(format!(
            "Cannot move test drive from {} to {}",
            current, next
        )));
    }

    Ok(next)
}

/// Respuesta del administrador a una consulta
pub fn admin_set_inquiry_status(
    current: InquiryStatus,
    requested: &str,
) -> Result<InquiryStatus, EngagementError> {
    let next: InquiryStatus = requested.parse().map_err(|_| {
        EngagementError::InvalidTransition(format!("Invalid inquiry status '{}'", requested))
    })?;

    if !inquiry_transition_allowed(Actor::Admin, current, next) {
        return Err(EngagementError::InvalidTransition(format!(
            "Cannot move inquiry from {} to {}",
            current, next
        )));
    }

    Ok(next)
}

/// Alta en la wishlist: el vehículo debe existir y el par no puede repetirse
pub fn check_wishlist_add(vehicle_exists: bool, already_listed: bool) -> Result<(), EngagementError> {
    if !vehicle_exists {
        return Err(EngagementError::VehicleNotFound);
    }
    if already_listed {
        return Err(EngagementError::AlreadyInWishlist);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_cancel_open_test_drives() {
        for status in [
            TestDriveStatus::Pending,
            TestDriveStatus::Approved,
            TestDriveStatus::Rejected,
            TestDriveStatus::Cancelled,
        ] {
            assert_eq!(cancel_test_drive(5, status, 5), Ok(TestDriveStatus::Cancelled));
        }
    }

    #[test]
    fn test_completed_test_drive_cannot_be_cancelled() {
        let err = cancel_test_drive(5, TestDriveStatus::Completed, 5).unwrap_err();
        assert!(matches!(err, EngagementError::InvalidTransition(_)));
        assert_eq!(err.to_string(), "Cannot cancel a completed test drive");
    }

    #[test]
    fn test_non_owner_cannot_cancel() {
        assert_eq!(
            cancel_test_drive(5, TestDriveStatus::Pending, 6),
            Err(EngagementError::Forbidden)
        );
        // la propiedad se comprueba antes que el estado
        assert_eq!(
            cancel_test_drive(5, TestDriveStatus::Completed, 6),
            Err(EngagementError::Forbidden)
        );
    }

    #[test]
    fn test_admin_may_set_any_test_drive_status() {
        for &from in TestDriveStatus::ALL {
            for &to in TestDriveStatus::ALL {
                assert_eq!(admin_set_test_drive_status(from, to.as_str()), Ok(to));
            }
        }
    }

    #[test]
    fn test_unknown_status_values_are_rejected() {
        assert!(matches!(
            admin_set_test_drive_status(TestDriveStatus::Pending, "Done"),
            Err(EngagementError::InvalidTransition(_))
        ));
        assert!(matches!(
            admin_set_inquiry_status(InquiryStatus::Pending, "answered"),
            Err(EngagementError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_admin_inquiry_response_accepts_every_status() {
        for &to in InquiryStatus::ALL {
            assert_eq!(admin_set_inquiry_status(InquiryStatus::Pending, to.as_str()), Ok(to));
        }
        assert!(!inquiry_transition_allowed(
            Actor::Owner,
            InquiryStatus::Pending,
            InquiryStatus::Closed
        ));
    }

    #[test]
    fn test_owner_or_admin() {
        assert!(ensure_owner_or_admin(1, 1, Role::User).is_ok());
        assert!(ensure_owner_or_admin(1, 99, Role::Admin).is_ok());
        assert_eq!(
            ensure_owner_or_admin(1, 2, Role::User),
            Err(EngagementError::Forbidden)
        );
    }

    #[test]
    fn test_wishlist_add_rules() {
        assert_eq!(check_wishlist_add(false, false), Err(EngagementError::VehicleNotFound));
        assert_eq!(check_wishlist_add(true, true), Err(EngagementError::AlreadyInWishlist));
        assert!(check_wishlist_add(true, false).is_ok());
    }
}
