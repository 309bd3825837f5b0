// src/catalogo/catalogo_router.rs

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::backend::{ConsultaPagina, Entidad};
use crate::carrito::formato::formatear_bs;
use crate::shared::{AppError, GenericResponse};
use crate::usuarios::AuthenticatedUser;
use crate::AppState;

/// Listado paginado de un catálogo para los selectores del formulario.
/// Acepta `page`, `perPage` y `search`.
#[get("/catalogo/{entidad}")]
pub async fn listar_catalogo(
    data: web::Data<AppState>,
    entidad: web::Path<Entidad>,
    consulta: web::Query<ConsultaPagina>,
    usuario: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let entidad = entidad.into_inner();
    let pagina = data.catalogo.listar(entidad, &consulta, usuario.token()).await?;

    Ok(HttpResponse::Ok().json(GenericResponse::exito(
        format!("Listado de {}", entidad.ruta()),
        pagina,
    )))
}

/// Tasa oficial del dólar con la que se calculan los montos en bolívares.
#[get("/tasa")]
pub async fn ver_tasa(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(GenericResponse::exito(
        "Tasa del día",
        json!({
            "dollar_oficial": data.tasa.valor(),
            "formateada": formatear_bs(data.tasa.valor()),
        }),
    ))
}

#[get("/salud")]
pub async fn salud() -> HttpResponse {
    HttpResponse::Ok().json(GenericResponse::exito("ok", json!({ "servicio": "cerrajeria_w" })))
}
