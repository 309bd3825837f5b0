// src/logging.rs

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Instala el subscriber global. `RUST_LOG`, si está definido, tiene
/// prioridad sobre el nivel configurado.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let resultado = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = resultado {
        eprintln!("No se pudo iniciar el registro de logs: {}", e);
    }
}
