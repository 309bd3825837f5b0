// src/usuarios/mod.rs

// Claims del token emitido por el backend
pub mod usuario_structs;
// Extractor que valida el token y reenvía la identidad al resto de las rutas
pub mod auth_middleware;

pub use auth_middleware::AuthenticatedUser;
