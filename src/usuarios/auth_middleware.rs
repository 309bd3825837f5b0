// src/usuarios/auth_middleware.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, error};

use super::usuario_structs::Claims;
use crate::shared::AppError;
use crate::AppState;

/// ID con el que se identifican las solicitudes cuando la autenticación
/// está desactivada.
pub const USUARIO_LOCAL: i64 = 0;

/// Usuario que origina la solicitud. Cada usuario tiene sus propios
/// carritos, y su token se reenvía al backend.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub user_name: String,
    token: Option<String>,
}

impl AuthenticatedUser {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

fn token_bearer(req: &HttpRequest) -> Result<Option<String>, AppError> {
    let Some(valor) = req.headers().get("Authorization") else {
        return Ok(None);
    };
    let texto = valor
        .to_str()
        .map_err(|_| AppError::NoAutorizado("Token de autenticación inválido.".to_string()))?;
    match texto.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        _ => Err(AppError::NoAutorizado(
            "Formato de token inválido. Se esperaba 'Bearer <token>'.".to_string(),
        )),
    }
}

fn autenticar(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        error!("AppState no disponible en el extractor de autenticación");
        return Err(AppError::Interno("configuración del servidor".to_string()));
    };

    let token = token_bearer(req)?;

    if !state.auth.enabled {
        return Ok(AuthenticatedUser {
            user_id: USUARIO_LOCAL,
            user_name: "local".to_string(),
            token,
        });
    }

    let token = token
        .ok_or_else(|| AppError::NoAutorizado("Token de autenticación ausente.".to_string()))?;

    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(state.auth.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!(error = ?e, "JWT rechazado");
        let mensaje = match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expirado.",
            jsonwebtoken::errors::ErrorKind::InvalidSignature => "Firma del token inválida.",
            jsonwebtoken::errors::ErrorKind::InvalidToken => "Token malformado.",
            _ => "Token de autenticación inválido.",
        };
        AppError::NoAutorizado(mensaje.to_string())
    })?;

    Ok(AuthenticatedUser {
        user_id: token_data.claims.sub,
        user_name: token_data.claims.name,
        token: Some(token),
    })
}

/// Extractor de autenticación para Actix Web.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(autenticar(req))
    }
}
