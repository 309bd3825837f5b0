// src/carrito/mod.rs

// Motor del carrito compartido por compras y ventas
pub mod carrito_structs;
pub mod errores;
pub mod formato;
pub mod lineas;
pub mod totales;
pub mod transaccion;

pub use carrito_structs::{
    Candidato, LineaCarrito, PoliticaFusion, ResultadoAgregar, TasaCambio, TipoLinea,
};
pub use errores::ErrorCarrito;
pub use lineas::Carrito;
pub use totales::{calcular_totales, Totales};
pub use transaccion::{a_dto_creacion, Transaccion};
