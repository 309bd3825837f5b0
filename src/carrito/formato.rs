// src/carrito/formato.rs

//! Presentación de montos con la convención es-VE: punto para miles, coma
//! para decimales y siempre dos decimales. El núcleo numérico no depende de
//! este módulo.

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;

use super::totales::Totales;

pub fn formatear(valor: &BigDecimal) -> String {
    let redondeado = valor.round(2).with_scale(2);
    let negativo = redondeado < BigDecimal::zero();
    let texto = redondeado.abs().to_string();
    let (entero, decimales) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    let digitos: Vec<char> = entero.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }

    format!("{}{},{}", if negativo { "-" } else { "" }, agrupado, decimales)
}

pub fn formatear_usd(valor: &BigDecimal) -> String {
    format!("$ {}", formatear(valor))
}

pub fn formatear_bs(valor: &BigDecimal) -> String {
    format!("Bs. {}", formatear(valor))
}

/// Totales listos para mostrar en el resumen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalesFormateados {
    pub total_usd: String,
    pub total_bs: String,
}

impl<K> From<&Totales<K>> for TotalesFormateados {
    fn from(totales: &Totales<K>) -> Self {
        TotalesFormateados {
            total_usd: formatear_usd(&totales.total_usd),
            total_bs: formatear_bs(&totales.total_bs),
        }
    }
}
