// src/ventas/ventas_router.rs

use actix_web::web;

use super::ventas_structs::Venta;
use crate::envio::envio_router;

/// Rutas del carrito de ventas a clientes. Mismas operaciones que el de
/// compras, con productos y servicios y el cliente como contraparte.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    envio_router::registrar::<Venta>(cfg, "/ventas/carrito");
}
