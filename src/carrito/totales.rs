// src/carrito/totales.rs

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;

use super::carrito_structs::{LineaCarrito, TasaCambio, TipoLinea};

/// Totales derivados de un carrito. No se guardan: se recalculan en cada
/// consulta a partir de las líneas y la tasa.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totales<K> {
    /// Cantidad de líneas por tipo. Todos los tipos aparecen, aunque sea en cero.
    pub lineas_por_tipo: BTreeMap<K, usize>,
    /// Suma de `cantidad * precio_unitario_usd` por tipo.
    pub usd_por_tipo: BTreeMap<K, BigDecimal>,
    pub total_usd: BigDecimal,
    /// `total_usd * tasa`.
    pub total_bs: BigDecimal,
}

impl<K> Totales<K> {
    pub fn total_lineas(&self) -> usize {
        self.lineas_por_tipo.values().sum()
    }
}

pub fn calcular_totales<K: TipoLinea>(lineas: &[LineaCarrito<K>], tasa: &TasaCambio) -> Totales<K> {
    let mut lineas_por_tipo: BTreeMap<K, usize> = K::TODOS.iter().map(|t| (*t, 0)).collect();
    let mut usd_por_tipo: BTreeMap<K, BigDecimal> =
        K::TODOS.iter().map(|t| (*t, BigDecimal::zero())).collect();
    let mut total_usd = BigDecimal::zero();

    for linea in lineas {
        let subtotal = linea.subtotal_usd();
        *lineas_por_tipo.entry(linea.tipo).or_insert(0) += 1;
        let acumulado = usd_por_tipo.entry(linea.tipo).or_insert_with(BigDecimal::zero);
        *acumulado = &*acumulado + &subtotal;
        total_usd += subtotal;
    }

    let total_bs = tasa.a_bolivares(&total_usd);
    Totales {
        lineas_por_tipo,
        usd_por_tipo,
        total_usd,
        total_bs,
    }
}
