// src/backend/cliente.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::errores::ErrorRemoto;
use super::{
    AvisoStock, Catalogo, ConsultaPagina, Entidad, FuenteGastos, ItemCatalogo, Pagina,
    ServicioTransacciones,
};
use crate::config::BackendConfig;
use crate::gastos::GastoRecurrente;

/// Cliente HTTP del backend de la tienda. Reenvía el token del usuario que
/// origina cada llamada.
#[derive(Debug, Clone)]
pub struct ClienteBackend {
    client: Client,
    base_url: String,
    ruta_alertas: String,
    ruta_gastos: String,
}

/// El listado de gastos puede venir paginado o como arreglo plano.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListaGastos {
    Pagina { data: Vec<GastoRecurrente> },
    Plana(Vec<GastoRecurrente>),
}

impl ClienteBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ErrorRemoto> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ClienteBackend {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ruta_alertas: config.ruta_alertas.clone(),
            ruta_gastos: config.ruta_gastos.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn autorizar(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(t) => request.bearer_auth(t),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<T, ErrorRemoto> {
        let request = Self::autorizar(self.client.get(self.url(path)).query(query), token);
        let response = request.send().await?;
        Self::procesar(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        cuerpo: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<T, ErrorRemoto> {
        let request = Self::autorizar(self.client.post(self.url(path)).json(cuerpo), token);
        let response = request.send().await?;
        Self::procesar(response).await
    }

    async fn procesar<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ErrorRemoto> {
        let status = response.status();
        let texto = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), cuerpo = %texto, "respuesta de error del backend");
            return Err(ErrorRemoto::desde_respuesta(status.as_u16(), &texto));
        }

        serde_json::from_str(&texto).map_err(|e| {
            warn!(error = %e, "cuerpo JSON inválido en la respuesta del backend");
            ErrorRemoto::RespuestaInvalida
        })
    }
}

#[async_trait]
impl Catalogo for ClienteBackend {
    async fn listar(
        &self,
        entidad: Entidad,
        consulta: &ConsultaPagina,
        token: Option<&str>,
    ) -> Result<Pagina<ItemCatalogo>, ErrorRemoto> {
        let mut query = vec![
            ("page", consulta.page.to_string()),
            ("perPage", consulta.per_page.to_string()),
        ];
        if let Some(search) = &consulta.search {
            query.push(("search", search.clone()));
        }
        self.get(entidad.ruta(), &query, token).await
    }

    async fn buscar(
        &self,
        entidad: Entidad,
        id: i64,
        token: Option<&str>,
    ) -> Result<Option<ItemCatalogo>, ErrorRemoto> {
        let path = format!("{}/{}", entidad.ruta(), id);
        match self.get::<ItemCatalogo>(&path, &[], token).await {
            Ok(item) => Ok(Some(item)),
            Err(ErrorRemoto::Http { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ServicioTransacciones for ClienteBackend {
    async fn crear(
        &self,
        ruta: &str,
        cuerpo: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<serde_json::Value, ErrorRemoto> {
        self.post(ruta, cuerpo, token).await
    }
}

#[async_trait]
impl AvisoStock for ClienteBackend {
    async fn refrescar(&self, token: Option<&str>) -> Result<(), ErrorRemoto> {
        let alertas: serde_json::Value = self.get(&self.ruta_alertas, &[], token).await?;
        let cantidad = alertas
            .as_array()
            .or_else(|| alertas.get("data").and_then(|d| d.as_array()))
            .map(|a| a.len())
            .unwrap_or(0);
        info!(alertas = cantidad, "alertas de stock bajo refrescadas");
        Ok(())
    }
}

#[async_trait]
impl FuenteGastos for ClienteBackend {
    async fn listar_gastos(&self, token: Option<&str>) -> Result<Vec<GastoRecurrente>, ErrorRemoto> {
        let lista: ListaGastos = self.get(&self.ruta_gastos, &[], token).await?;
        Ok(match lista {
            ListaGastos::Pagina { data } => data,
            ListaGastos::Plana(gastos) => gastos,
        })
    }
}
