//! Services module
//!
//! Reglas de negocio puras. No tocan la base de datos: reciben el estado
//! leído por los repositorios y devuelven decisiones o errores tipados.

pub mod auth_service;
pub mod catalog_query;
pub mod engagement;
pub mod order_engine;
