// src/carrito/carrito_structs.rs

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::errores::ErrorCarrito;
use crate::backend::Entidad;

/// Conjunto cerrado de tipos de línea de una transacción.
///
/// Las compras mezclan materiales y productos; las ventas, productos y
/// servicios. El orden de `TODOS` es el orden en que se muestran los
/// contadores y en que se arman los arreglos del DTO.
pub trait TipoLinea:
    Copy + Eq + Ord + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const TODOS: &'static [Self];

    /// Nombre legible para mensajes ("material", "producto", ...).
    fn etiqueta(self) -> &'static str;

    /// Catálogo del backend donde vive la entidad referenciada.
    fn entidad(self) -> Entidad;
}

/// Tasa oficial del dólar: bolívares por cada USD. Siempre positiva.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TasaCambio(BigDecimal);

impl TasaCambio {
    pub fn nueva(valor: BigDecimal) -> Result<Self, ErrorCarrito> {
        if valor <= BigDecimal::zero() {
            return Err(ErrorCarrito::TasaInvalida(valor.to_string()));
        }
        Ok(TasaCambio(valor))
    }

    pub fn valor(&self) -> &BigDecimal {
        &self.0
    }

    /// Convierte un monto en USD a bolívares.
    pub fn a_bolivares(&self, usd: &BigDecimal) -> BigDecimal {
        usd * &self.0
    }
}

impl FromStr for TasaCambio {
    type Err = ErrorCarrito;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let limpio = s.trim();
        let valor = BigDecimal::from_str(limpio)
            .map_err(|_| ErrorCarrito::TasaInvalida(limpio.to_string()))?;
        TasaCambio::nueva(valor)
    }
}

/// Qué hacer cuando se agrega de nuevo un par `(id, tipo)` ya presente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticaFusion {
    /// La cantidad nueva se suma a la existente.
    #[default]
    Sumar,
    /// La cantidad nueva reemplaza a la existente.
    Reemplazar,
}

/// Ítem que la interfaz propone agregar al carrito.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidato<K> {
    pub id: i64,
    pub tipo: K,
    pub nombre: String,
    pub cantidad: BigDecimal,
    pub precio_unitario_usd: BigDecimal,
    /// Precio en bolívares explícito. Si falta se deriva con la tasa vigente.
    pub precio_unitario_bs: Option<BigDecimal>,
}

/// Una línea del carrito. Nombre y precios se copian del catálogo al
/// momento de agregar y no se vuelven a consultar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineaCarrito<K> {
    pub id: i64,
    pub tipo: K,
    pub nombre: String,
    pub cantidad: BigDecimal,
    pub precio_unitario_usd: BigDecimal,
    pub precio_unitario_bs: BigDecimal,
}

impl<K> LineaCarrito<K> {
    pub fn subtotal_usd(&self) -> BigDecimal {
        &self.cantidad * &self.precio_unitario_usd
    }
}

/// Resultado de `Carrito::agregar`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultadoAgregar {
    /// Se creó una línea nueva al final del carrito.
    Agregada,
    /// Ya existía la línea; lleva la cantidad resultante.
    Fusionada { cantidad: BigDecimal },
    /// El ítem no tiene precio en ninguna moneda; el carrito no cambió.
    Ignorada,
}
