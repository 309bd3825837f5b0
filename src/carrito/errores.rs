// src/carrito/errores.rs

use thiserror::Error;

/// Errores de validación del carrito. Se detectan antes de cualquier llamada
/// de red y nunca se envían al backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorCarrito {
    #[error("La cantidad debe ser mayor que cero.")]
    CantidadInvalida,

    /// El argumento es el nombre de la contraparte ("proveedor" o "cliente").
    #[error("Debe seleccionar un {0} antes de registrar la operación.")]
    SinContraparte(&'static str),

    #[error("El carrito está vacío. Agregue ítems antes de registrar la operación.")]
    CarritoVacio,

    #[error("Hay un envío en curso. Espere a que termine.")]
    EnvioEnCurso,

    #[error("La tasa de cambio debe ser un número positivo (recibido: {0}).")]
    TasaInvalida(String),
}
