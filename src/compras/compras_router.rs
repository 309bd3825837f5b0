// src/compras/compras_router.rs

use actix_web::web;

use super::compras_structs::Compra;
use crate::envio::envio_router;

/// Rutas del carrito de compras a proveedores:
///
/// - `GET    /compras/carrito`                     resumen con totales
/// - `POST   /compras/carrito/items`               agrega material o producto
/// - `DELETE /compras/carrito/items/{tipo}/{id}`   quita una línea
/// - `PUT    /compras/carrito/contraparte`         elige el proveedor
/// - `POST   /compras/carrito/enviar`              registra la compra
/// - `DELETE /compras/carrito`                     descarta el formulario
pub fn configurar(cfg: &mut web::ServiceConfig) {
    envio_router::registrar::<Compra>(cfg, "/compras/carrito");
}
