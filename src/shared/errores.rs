// src/shared/errores.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use super::shared_structs::GenericResponse;
use crate::backend::ErrorRemoto;
use crate::carrito::ErrorCarrito;

/// Error de las rutas del panel. Se convierte en una respuesta
/// `GenericResponse` con `status = "error"`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Carrito(#[from] ErrorCarrito),

    #[error(transparent)]
    Remoto(#[from] ErrorRemoto),

    #[error("{0}")]
    Validacion(String),

    #[error("{0}")]
    NoEncontrado(String),

    #[error("{0}")]
    NoAutorizado(String),

    #[error("Error interno: {0}")]
    Interno(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Carrito(ErrorCarrito::EnvioEnCurso) => StatusCode::CONFLICT,
            AppError::Carrito(_) | AppError::Validacion(_) => StatusCode::BAD_REQUEST,
            AppError::Remoto(ErrorRemoto::Http { status, .. }) => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::Remoto(_) => StatusCode::BAD_GATEWAY,
            AppError::NoEncontrado(_) => StatusCode::NOT_FOUND,
            AppError::NoAutorizado(_) => StatusCode::UNAUTHORIZED,
            AppError::Interno(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "error al procesar la solicitud");
        } else {
            warn!(status = status.as_u16(), error = %self, "solicitud rechazada");
        }
        HttpResponse::build(status).json(GenericResponse::error(self.to_string()))
    }
}
