// src/envio/servicio.rs

use tracing::{error, info, warn};

use super::sesiones::Sesiones;
use crate::backend::{AvisoStock, ServicioTransacciones};
use crate::carrito::Transaccion;
use crate::shared::AppError;

/// Mensaje del fallo registrado cuando el envío se abandona a medio camino.
pub const MENSAJE_INTERRUMPIDO: &str = "El envío se interrumpió antes de recibir respuesta.";

/// Mantiene el formulario en `Enviando` mientras vive. Si se descarta sin
/// concluir (p. ej. el cliente cortó la conexión y actix soltó el handler),
/// deja la sesión en `Fallido` para que el usuario pueda reintentar.
struct GuardiaEnvio<'a, T: Transaccion> {
    sesiones: Option<&'a Sesiones<T>>,
    usuario: i64,
}

impl<'a, T: Transaccion> GuardiaEnvio<'a, T> {
    fn new(sesiones: &'a Sesiones<T>, usuario: i64) -> Self {
        GuardiaEnvio {
            sesiones: Some(sesiones),
            usuario,
        }
    }

    fn concluir(mut self, resultado: Result<(), String>) -> Result<(), AppError> {
        match self.sesiones.take() {
            Some(sesiones) => sesiones.con_sesion(self.usuario, |s| s.concluir_envio(resultado)),
            None => Ok(()),
        }
    }
}

impl<T: Transaccion> Drop for GuardiaEnvio<'_, T> {
    fn drop(&mut self) {
        if let Some(sesiones) = self.sesiones.take() {
            warn!(transaccion = T::NOMBRE, usuario = self.usuario, "envío interrumpido");
            let resultado = sesiones.con_sesion(self.usuario, |s| {
                s.concluir_envio(Err(MENSAJE_INTERRUMPIDO.to_string()))
            });
            if let Err(e) = resultado {
                error!(error = %e, "no se pudo liberar el formulario interrumpido");
            }
        }
    }
}

/// Registra en el backend la transacción en curso de `usuario`.
///
/// 1. Valida y bloquea el formulario (`Enviando`).
/// 2. Libera el lock y hace el `POST` de creación, un solo intento.
/// 3. Éxito: limpia el formulario y pide refrescar las alertas de stock.
///    Fallo o interrupción: guarda el mensaje y conserva el carrito.
pub async fn enviar_transaccion<T: Transaccion>(
    sesiones: &Sesiones<T>,
    usuario: i64,
    transacciones: &dyn ServicioTransacciones,
    avisos: &dyn AvisoStock,
    token: Option<&str>,
) -> Result<serde_json::Value, AppError> {
    let dto = sesiones.con_sesion(usuario, |s| s.preparar_envio())??;
    let guardia = GuardiaEnvio::new(sesiones, usuario);

    let cuerpo = match serde_json::to_value(&dto) {
        Ok(cuerpo) => cuerpo,
        Err(e) => {
            let mensaje = format!("no se pudo serializar la {}: {}", T::NOMBRE, e);
            guardia.concluir(Err(mensaje.clone()))?;
            return Err(AppError::Interno(mensaje));
        }
    };

    match transacciones.crear(T::RUTA_CREACION, &cuerpo, token).await {
        Ok(creado) => {
            guardia.concluir(Ok(()))?;
            info!(transaccion = T::NOMBRE, usuario, "transacción registrada");

            if let Err(e) = avisos.refrescar(token).await {
                warn!(error = %e, "no se pudieron refrescar las alertas de stock");
            }
            Ok(creado)
        }
        Err(e) => {
            warn!(transaccion = T::NOMBRE, usuario, error = %e, "el backend rechazó la transacción");
            guardia.concluir(Err(e.to_string()))?;
            Err(e.into())
        }
    }
}
