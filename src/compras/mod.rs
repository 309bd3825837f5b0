// src/compras/mod.rs

pub mod compras_router;
pub mod compras_structs;

pub use compras_structs::{Compra, CompraDto, LineaMaterialDto, LineaProductoCompraDto, TipoCompra};
