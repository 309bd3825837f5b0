// src/shared/shared_structs.rs

use serde::Serialize;

/// Sobre estándar de todas las respuestas del panel.
/// 'T' es el tipo del cuerpo, que puede faltar.
#[derive(Debug, Serialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] // No serializa 'body' si es None
    pub body: Option<T>,
}

impl<T> GenericResponse<T> {
    pub fn exito(message: impl Into<String>, body: T) -> Self {
        GenericResponse {
            status: "success".to_string(),
            message: message.into(),
            body: Some(body),
        }
    }
}

impl GenericResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        GenericResponse {
            status: "error".to_string(),
            message: message.into(),
            body: None,
        }
    }
}
