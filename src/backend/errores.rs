// src/backend/errores.rs

use thiserror::Error;

/// Mensaje cuando el backend responde con error sin explicar por qué.
pub const MENSAJE_GENERICO: &str = "Error al procesar la solicitud.";

/// Fallas al hablar con el backend de la tienda. Ninguna es fatal: el
/// usuario puede corregir o reintentar, y nada se reintenta solo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorRemoto {
    #[error("No se pudo conectar con el servidor: {0}")]
    Conexion(String),

    /// Respuesta no 2xx. `mensaje` sale del campo `message` o `error` del
    /// cuerpo, o es `MENSAJE_GENERICO`.
    #[error("{mensaje}")]
    Http { status: u16, mensaje: String },

    #[error("Respuesta inválida del servidor.")]
    RespuestaInvalida,
}

impl ErrorRemoto {
    pub fn desde_respuesta(status: u16, cuerpo: &str) -> Self {
        ErrorRemoto::Http {
            status,
            mensaje: extraer_mensaje(cuerpo).unwrap_or_else(|| MENSAJE_GENERICO.to_string()),
        }
    }
}

impl From<reqwest::Error> for ErrorRemoto {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ErrorRemoto::RespuestaInvalida
        } else {
            ErrorRemoto::Conexion(e.to_string())
        }
    }
}

/// Busca `message` y luego `error` en un cuerpo JSON de error.
pub fn extraer_mensaje(cuerpo: &str) -> Option<String> {
    let valor: serde_json::Value = serde_json::from_str(cuerpo).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|campo| valor.get(*campo).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
