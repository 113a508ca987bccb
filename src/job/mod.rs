//! Job records: models, request validation and CRUD/inspection handlers.

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod validation;
