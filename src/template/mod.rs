//! Document templates: models, the builtin catalog and read endpoints.

pub mod catalog;
pub mod handlers;
pub mod models;
