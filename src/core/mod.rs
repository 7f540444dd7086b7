//! Core export, module extraction, serialization and import logic

pub mod export;
pub mod import;
pub mod module;
pub mod serialize;
