// src/backend/mod.rs

//! Colaboradores externos: el backend REST de la tienda. El resto del crate
//! depende solo de estos traits; `ClienteBackend` es la implementación HTTP.

use async_trait::async_trait;

pub mod backend_structs;
pub mod cliente;
pub mod errores;

pub use backend_structs::{ConsultaPagina, Entidad, ItemCatalogo, Pagina};
pub use cliente::ClienteBackend;
pub use errores::ErrorRemoto;

use crate::gastos::GastoRecurrente;

/// Listados paginados y búsqueda por id de los catálogos.
#[async_trait]
pub trait Catalogo: Send + Sync {
    async fn listar(
        &self,
        entidad: Entidad,
        consulta: &ConsultaPagina,
        token: Option<&str>,
    ) -> Result<Pagina<ItemCatalogo>, ErrorRemoto>;

    /// `Ok(None)` cuando el backend responde 404.
    async fn buscar(
        &self,
        entidad: Entidad,
        id: i64,
        token: Option<&str>,
    ) -> Result<Option<ItemCatalogo>, ErrorRemoto>;
}

/// Endpoints `POST` de creación de compras y ventas.
#[async_trait]
pub trait ServicioTransacciones: Send + Sync {
    /// Devuelve el registro creado tal como lo responde el backend.
    async fn crear(
        &self,
        ruta: &str,
        cuerpo: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<serde_json::Value, ErrorRemoto>;
}

/// Avisa al subsistema de alertas de stock bajo que debe refrescarse.
#[async_trait]
pub trait AvisoStock: Send + Sync {
    async fn refrescar(&self, token: Option<&str>) -> Result<(), ErrorRemoto>;
}

/// Registros de gastos recurrentes usados por la proyección mensual.
#[async_trait]
pub trait FuenteGastos: Send + Sync {
    async fn listar_gastos(&self, token: Option<&str>) -> Result<Vec<GastoRecurrente>, ErrorRemoto>;
}
