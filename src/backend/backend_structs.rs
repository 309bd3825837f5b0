// src/backend/backend_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Catálogos expuestos por el backend de la tienda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entidad {
    Materiales,
    Productos,
    Servicios,
    Proveedores,
    Clientes,
}

impl Entidad {
    /// Segmento de ruta del recurso en el backend.
    pub fn ruta(self) -> &'static str {
        match self {
            Entidad::Materiales => "materiales",
            Entidad::Productos => "productos",
            Entidad::Servicios => "servicios",
            Entidad::Proveedores => "proveedores",
            Entidad::Clientes => "clientes",
        }
    }
}

/// Entrada de catálogo tal como la necesita el carrito. Proveedores y
/// clientes no traen precio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalogo {
    pub id: i64,
    pub nombre: String,
    #[serde(default, alias = "precio")]
    pub precio_usd: Option<BigDecimal>,
}

/// Página de resultados con la forma `{data, total, page, perPage}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagina<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    #[serde(rename = "perPage")]
    pub per_page: u32,
}

/// Parámetros de paginación y búsqueda de los listados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultaPagina {
    #[serde(default = "pagina_inicial")]
    pub page: u32,
    #[serde(default = "por_pagina", rename = "perPage")]
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ConsultaPagina {
    fn default() -> Self {
        ConsultaPagina {
            page: pagina_inicial(),
            per_page: por_pagina(),
            search: None,
        }
    }
}

fn pagina_inicial() -> u32 {
    1
}

fn por_pagina() -> u32 {
    20
}
