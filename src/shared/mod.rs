// src/shared/mod.rs

pub mod errores;
pub mod shared_structs;

pub use errores::AppError;
pub use shared_structs::GenericResponse;
