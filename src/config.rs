// src/config.rs

use std::net::SocketAddr;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::carrito::{ErrorCarrito, PoliticaFusion, TasaCambio};

/// Variable de entorno con la tasa oficial; pisa el valor del archivo.
pub const VARIABLE_TASA: &str = "DOLLAR_OFICIAL";

#[derive(Parser, Debug)]
#[command(name = "cerrajeria_w", about = "Panel de compras y ventas de Cerrajería W")]
pub struct CliArgs {
    /// Ruta del archivo de configuración
    #[arg(short, long, default_value = "cerrajeria.toml")]
    pub config: String,

    /// Puerto (pisa el del archivo)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Nivel de log (pisa el del archivo)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ErrorConfig {
    #[error("No se pudo leer {ruta}: {origen}")]
    Lectura {
        ruta: String,
        origen: std::io::Error,
    },

    #[error("Archivo de configuración inválido: {0}")]
    Formato(#[from] toml::de::Error),

    #[error("Falta la tasa del dólar: configure [tasa].dollar_oficial o DOLLAR_OFICIAL")]
    TasaAusente,

    #[error(transparent)]
    Tasa(#[from] ErrorCarrito),

    #[error("auth.enabled = true requiere auth.jwt_secret")]
    SecretoAusente,

    #[error("Dirección de escucha inválida: {0}")]
    Direccion(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub tasa: TasaConfig,

    #[serde(default)]
    pub carrito: CarritoConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// URL base de la API REST de la tienda, p. ej. `http://localhost:4000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Recurso consultado para refrescar las alertas de stock bajo.
    #[serde(default = "default_ruta_alertas")]
    pub ruta_alertas: String,

    #[serde(default = "default_ruta_gastos")]
    pub ruta_gastos: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TasaConfig {
    /// Bolívares por dólar, como texto decimal ("36.50").
    #[serde(default)]
    pub dollar_oficial: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CarritoConfig {
    #[serde(default)]
    pub politica_fusion: PoliticaFusion,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Si es false se acepta cualquier solicitud como usuario local.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub jwt_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            ruta_alertas: default_ruta_alertas(),
            ruta_gastos: default_ruta_gastos(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_ruta_alertas() -> String {
    "productos/stock-bajo".to_string()
}

fn default_ruta_gastos() -> String {
    "gastos".to_string()
}

impl Config {
    /// Lee el archivo (si existe), aplica la tasa del entorno y las
    /// opciones de la línea de comandos.
    pub fn load(cli: &CliArgs) -> Result<Self, ErrorConfig> {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => Config::from_toml_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(origen) => {
                return Err(ErrorConfig::Lectura {
                    ruta: cli.config.clone(),
                    origen,
                })
            }
        };

        config.aplicar_entorno(std::env::var(VARIABLE_TASA).ok());

        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        config.validar()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ErrorConfig> {
        Ok(toml::from_str(contents)?)
    }

    pub fn aplicar_entorno(&mut self, dollar_oficial: Option<String>) {
        if let Some(valor) = dollar_oficial.filter(|v| !v.trim().is_empty()) {
            self.tasa.dollar_oficial = Some(valor);
        }
    }

    pub fn validar(&self) -> Result<(), ErrorConfig> {
        if self.auth.enabled && self.auth.jwt_secret.is_empty() {
            return Err(ErrorConfig::SecretoAusente);
        }
        self.tasa_cambio()?;
        self.listen_addr()?;
        Ok(())
    }

    pub fn tasa_cambio(&self) -> Result<TasaCambio, ErrorConfig> {
        let texto = self
            .tasa
            .dollar_oficial
            .as_deref()
            .ok_or(ErrorConfig::TasaAusente)?;
        Ok(texto.parse::<TasaCambio>()?)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ErrorConfig> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ErrorConfig::Direccion(addr))
    }
}
