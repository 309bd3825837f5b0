// src/gastos/gastos_router.rs

use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use tracing::debug;

use super::gastos_structs::{ConsultaProyeccion, ProyeccionMensual};
use super::proyeccion::proyectar_mes;
use crate::carrito::formato::formatear_usd;
use crate::shared::{AppError, GenericResponse};
use crate::usuarios::AuthenticatedUser;
use crate::AppState;

#[derive(Serialize)]
struct VistaProyeccion {
    #[serde(flatten)]
    proyeccion: ProyeccionMensual,
    total_formateado: String,
}

/// Gastos recurrentes proyectados sobre un mes (`?anio=2026&mes=10`),
/// agrupados por día para el calendario.
#[get("/gastos/proyeccion")]
pub async fn proyeccion_mensual(
    data: web::Data<AppState>,
    consulta: web::Query<ConsultaProyeccion>,
    usuario: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let gastos = data.gastos.listar_gastos(usuario.token()).await?;
    debug!(registros = gastos.len(), anio = consulta.anio, mes = consulta.mes, "proyectando gastos");

    let proyeccion = proyectar_mes(&gastos, consulta.anio, consulta.mes)
        .ok_or_else(|| AppError::Validacion(format!("Mes inválido: {}.", consulta.mes)))?;

    let total_formateado = formatear_usd(&proyeccion.total_usd);
    Ok(HttpResponse::Ok().json(GenericResponse::exito(
        "Proyección de gastos",
        VistaProyeccion {
            proyeccion,
            total_formateado,
        },
    )))
}
