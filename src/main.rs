// src/main.rs

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use tracing::info;

use cerrajeria_w::backend::ClienteBackend;
use cerrajeria_w::compras::Compra;
use cerrajeria_w::config::{CliArgs, Config};
use cerrajeria_w::envio::Sesiones;
use cerrajeria_w::ventas::Venta;
use cerrajeria_w::{configurar_rutas, logging, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();
    let config = Config::load(&cli).map_err(io::Error::other)?;
    logging::init(&config.logging);

    let tasa = config.tasa_cambio().map_err(io::Error::other)?;
    let addr = config.listen_addr().map_err(io::Error::other)?;

    // Un solo cliente HTTP cubre catálogo, creación, alertas y gastos
    let backend = Arc::new(ClienteBackend::new(&config.backend).map_err(io::Error::other)?);

    let app_state = web::Data::new(AppState {
        tasa,
        auth: config.auth.clone(),
        catalogo: backend.clone(),
        transacciones: backend.clone(),
        avisos: backend.clone(),
        gastos: backend,
    });

    // Carritos en curso, uno por usuario y tipo de transacción
    let politica = config.carrito.politica_fusion;
    let compras = web::Data::new(Sesiones::<Compra>::new(politica));
    let ventas = web::Data::new(Sesiones::<Venta>::new(politica));

    info!(
        %addr,
        backend = %config.backend.base_url,
        tasa = %app_state.tasa.valor(),
        politica_fusion = ?politica,
        auth = config.auth.enabled,
        "iniciando panel de Cerrajería W"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .app_data(compras.clone())
            .app_data(ventas.clone())
            .configure(configurar_rutas)
    })
    .bind(addr)?
    .run()
    .await
}
