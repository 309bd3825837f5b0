// src/envio/mod.rs

// Estado del formulario y envío de la transacción al backend
pub mod envio_router;
pub mod servicio;
pub mod sesion;
pub mod sesiones;

pub use servicio::enviar_transaccion;
pub use sesion::{EstadoEnvio, SesionTransaccion};
pub use sesiones::Sesiones;
