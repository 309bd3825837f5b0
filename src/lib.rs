// src/lib.rs

//! Panel de compras y ventas de Cerrajería W.
//!
//! Mantiene los carritos en curso de cada usuario, calcula los totales en
//! dólares y bolívares con la tasa del día y registra las transacciones en
//! el backend REST de la tienda.

use std::sync::Arc;

use actix_web::web;

pub mod backend;
pub mod carrito;
pub mod catalogo;
pub mod compras;
pub mod config;
pub mod envio;
pub mod gastos;
pub mod logging;
pub mod shared;
pub mod usuarios;
pub mod ventas;

use backend::{AvisoStock, Catalogo, FuenteGastos, ServicioTransacciones};
use carrito::TasaCambio;
use config::AuthConfig;

/// Estado compartido por todas las rutas. Los colaboradores externos se
/// inyectan como traits para poder reemplazarlos en pruebas.
pub struct AppState {
    pub tasa: TasaCambio,
    pub auth: AuthConfig,
    pub catalogo: Arc<dyn Catalogo>,
    pub transacciones: Arc<dyn ServicioTransacciones>,
    pub avisos: Arc<dyn AvisoStock>,
    pub gastos: Arc<dyn FuenteGastos>,
}

/// Registra todas las rutas del panel.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.service(catalogo::catalogo_router::salud)
        .service(catalogo::catalogo_router::ver_tasa)
        .service(catalogo::catalogo_router::listar_catalogo)
        .service(gastos::gastos_router::proyeccion_mensual)
        .configure(compras::compras_router::configurar)
        .configure(ventas::ventas_router::configurar);
}
