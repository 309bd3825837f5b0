// src/carrito/transaccion.rs

use std::fmt;

use serde::Serialize;

use super::carrito_structs::{LineaCarrito, TipoLinea};
use super::errores::ErrorCarrito;
use super::lineas::Carrito;
use crate::backend::Entidad;

/// Describe un tipo de transacción (compra o venta): qué líneas admite,
/// contra quién se registra y cómo se arma el cuerpo para el endpoint de
/// creación del backend.
pub trait Transaccion: Send + Sync + 'static {
    type Tipo: TipoLinea;
    type Dto: Serialize + fmt::Debug + Send;

    /// "compra" / "venta", para logs y mensajes.
    const NOMBRE: &'static str;
    /// "proveedor" / "cliente".
    const CONTRAPARTE: &'static str;
    /// Catálogo donde se valida la contraparte.
    const ENTIDAD_CONTRAPARTE: Entidad;
    /// Ruta relativa del endpoint `POST` de creación.
    const RUTA_CREACION: &'static str;

    /// Arma el DTO a partir de líneas ya validadas.
    fn armar_dto(contraparte_id: i64, lineas: &[LineaCarrito<Self::Tipo>]) -> Self::Dto;
}

/// Valida el carrito y la contraparte y devuelve el DTO de creación.
///
/// Los errores son de validación previa al envío: nunca se llama al backend
/// con un carrito vacío o sin contraparte.
pub fn a_dto_creacion<T: Transaccion>(
    carrito: &Carrito<T::Tipo>,
    contraparte: Option<i64>,
) -> Result<T::Dto, ErrorCarrito> {
    let contraparte_id = contraparte.ok_or(ErrorCarrito::SinContraparte(T::CONTRAPARTE))?;
    if carrito.is_empty() {
        return Err(ErrorCarrito::CarritoVacio);
    }
    Ok(T::armar_dto(contraparte_id, carrito.lineas()))
}
