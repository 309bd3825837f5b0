// src/envio/sesiones.rs

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::error;

use super::sesion::{EstadoEnvio, SesionTransaccion};
use crate::carrito::{ErrorCarrito, PoliticaFusion, Transaccion};
use crate::shared::AppError;

/// Formularios en curso de un tipo de transacción, uno por usuario.
///
/// Solo viven en memoria. El lock nunca se mantiene durante una llamada
/// al backend. Un formulario vacío e inactivo no ocupa entrada en el mapa.
pub struct Sesiones<T: Transaccion> {
    por_usuario: RwLock<HashMap<i64, SesionTransaccion<T>>>,
    politica: PoliticaFusion,
}

fn envenenado<T: Transaccion>() -> AppError {
    error!(transaccion = T::NOMBRE, "lock de sesiones envenenado");
    AppError::Interno("sesiones no disponibles".to_string())
}

impl<T: Transaccion> Sesiones<T> {
    pub fn new(politica: PoliticaFusion) -> Self {
        Sesiones {
            por_usuario: RwLock::new(HashMap::new()),
            politica,
        }
    }

    /// Ejecuta `f` sobre la sesión del usuario, creándola vacía si no existe.
    /// Si después de `f` la sesión quedó vacía e inactiva, se descarta.
    pub fn con_sesion<R>(
        &self,
        usuario: i64,
        f: impl FnOnce(&mut SesionTransaccion<T>) -> R,
    ) -> Result<R, AppError> {
        let mut mapa = self.por_usuario.write().map_err(|_| envenenado::<T>())?;
        let politica = self.politica;
        let sesion = mapa
            .entry(usuario)
            .or_insert_with(|| SesionTransaccion::new(politica));
        let resultado = f(sesion);

        if sesion.es_descartable() {
            mapa.remove(&usuario);
        }
        Ok(resultado)
    }

    /// Lectura sin crear entradas: un usuario sin sesión ve un formulario vacío.
    pub fn leer<R>(
        &self,
        usuario: i64,
        f: impl FnOnce(&SesionTransaccion<T>) -> R,
    ) -> Result<R, AppError> {
        let mapa = self.por_usuario.read().map_err(|_| envenenado::<T>())?;
        Ok(match mapa.get(&usuario) {
            Some(sesion) => f(sesion),
            None => f(&SesionTransaccion::new(self.politica)),
        })
    }

    /// Falla con `EnvioEnCurso` si el formulario del usuario está enviándose.
    pub fn disponible(&self, usuario: i64) -> Result<(), AppError> {
        if self.leer(usuario, |s| *s.estado() == EstadoEnvio::Enviando)? {
            return Err(ErrorCarrito::EnvioEnCurso.into());
        }
        Ok(())
    }

    /// Cantidad de formularios con contenido o estado pendiente.
    pub fn activas(&self) -> usize {
        self.por_usuario.read().map(|m| m.len()).unwrap_or(0)
    }
}
