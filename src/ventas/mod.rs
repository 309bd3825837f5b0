// src/ventas/mod.rs

pub mod ventas_router;
pub mod ventas_structs;

pub use ventas_structs::{LineaVentaDto, TipoVenta, Venta, VentaDto};
