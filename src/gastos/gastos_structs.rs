// src/gastos/gastos_structs.rs

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cada cuánto se repite un gasto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frecuencia {
    Unico,
    Semanal,
    /// Cada 15 días a partir de la fecha de inicio.
    Quincenal,
    Mensual,
    Anual,
}

/// Registro de gasto tal como lo guarda el backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GastoRecurrente {
    pub id: i64,
    pub descripcion: String,
    #[serde(alias = "monto")]
    pub monto_usd: BigDecimal,
    pub frecuencia: Frecuencia,
    pub fecha_inicio: NaiveDate,
    #[serde(default)]
    pub fecha_fin: Option<NaiveDate>,
}

/// Una aparición de un gasto en un día del calendario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ocurrencia {
    pub gasto_id: i64,
    pub descripcion: String,
    pub monto_usd: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProyeccionMensual {
    pub anio: i32,
    pub mes: u32,
    /// Solo los días con al menos un gasto.
    pub dias: BTreeMap<NaiveDate, Vec<Ocurrencia>>,
    pub total_usd: BigDecimal,
}

#[derive(Debug, Deserialize)]
pub struct ConsultaProyeccion {
    pub anio: i32,
    pub mes: u32,
}
