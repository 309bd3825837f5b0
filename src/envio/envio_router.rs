// src/envio/envio_router.rs

use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::servicio::enviar_transaccion;
use super::sesion::{EstadoEnvio, SesionTransaccion};
use super::sesiones::Sesiones;
use crate::carrito::formato::TotalesFormateados;
use crate::carrito::{
    calcular_totales, Candidato, ErrorCarrito, LineaCarrito, ResultadoAgregar, TasaCambio,
    TipoLinea, Totales, Transaccion,
};
use crate::shared::{AppError, GenericResponse};
use crate::usuarios::AuthenticatedUser;
use crate::AppState;

/// Ítem que el usuario eligió en el selector. Nombre y precio en USD se
/// toman del catálogo salvo que se indique otro precio (p. ej. el costo de
/// la factura en una compra).
#[derive(Debug, Deserialize)]
pub struct NuevoItem<K> {
    pub id: i64,
    pub tipo: K,
    pub cantidad: BigDecimal,
    #[serde(default)]
    pub precio_unitario_usd: Option<BigDecimal>,
    #[serde(default)]
    pub precio_unitario_bs: Option<BigDecimal>,
}

#[derive(Debug, Deserialize)]
pub struct SeleccionContraparte {
    pub id: Option<i64>,
}

/// Línea tal como se muestra. Solo lleva subtotal en USD: el monto en
/// bolívares del resumen sale de `total_usd * tasa`, y un subtotal por línea
/// con el precio en Bs de la factura no sumaría lo mismo.
#[derive(Debug, Serialize)]
pub struct VistaLinea<K> {
    #[serde(flatten)]
    pub linea: LineaCarrito<K>,
    pub subtotal_usd: BigDecimal,
}

/// Todo lo que el resumen del formulario necesita mostrar.
#[derive(Debug, Serialize)]
pub struct VistaCarrito<K> {
    pub lineas: Vec<VistaLinea<K>>,
    pub totales: Totales<K>,
    pub totales_formateados: TotalesFormateados,
    pub contraparte: Option<i64>,
    pub estado: EstadoEnvio,
    pub puede_enviar: bool,
    pub tasa: BigDecimal,
}

fn armar_vista<T: Transaccion>(
    sesion: &SesionTransaccion<T>,
    tasa: &TasaCambio,
) -> VistaCarrito<T::Tipo> {
    let lineas = sesion.carrito().lineas();
    let totales = calcular_totales(lineas, tasa);
    VistaCarrito {
        lineas: lineas
            .iter()
            .map(|l| VistaLinea {
                linea: l.clone(),
                subtotal_usd: l.subtotal_usd(),
            })
            .collect(),
        totales_formateados: TotalesFormateados::from(&totales),
        totales,
        contraparte: sesion.contraparte(),
        estado: sesion.estado().clone(),
        puede_enviar: sesion.puede_enviar(),
        tasa: tasa.valor().clone(),
    }
}

/// Registra las rutas del formulario de creación de `T` bajo `base`.
pub fn registrar<T: Transaccion>(cfg: &mut web::ServiceConfig, base: &str) {
    cfg.service(
        web::scope(base)
            .route("", web::get().to(ver_carrito::<T>))
            .route("", web::delete().to(cancelar::<T>))
            .route("/items", web::post().to(agregar_item::<T>))
            .route("/items/{tipo}/{id}", web::delete().to(quitar_item::<T>))
            .route("/contraparte", web::put().to(seleccionar_contraparte::<T>))
            .route("/enviar", web::post().to(enviar::<T>)),
    );
}

async fn ver_carrito<T: Transaccion>(
    data: web::Data<AppState>,
    sesiones: web::Data<Sesiones<T>>,
    usuario: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let vista = sesiones.leer(usuario.user_id, |s| armar_vista(s, &data.tasa))?;
    Ok(HttpResponse::Ok().json(GenericResponse::exito("Contenido del carrito", vista)))
}

async fn agregar_item<T: Transaccion>(
    data: web::Data<AppState>,
    sesiones: web::Data<Sesiones<T>>,
    usuario: AuthenticatedUser,
    item: web::Json<NuevoItem<T::Tipo>>,
) -> Result<HttpResponse, AppError> {
    let item = item.into_inner();

    // Se valida antes de consultar el catálogo
    if item.cantidad <= BigDecimal::zero() {
        return Err(ErrorCarrito::CantidadInvalida.into());
    }
    let negativo = [&item.precio_unitario_usd, &item.precio_unitario_bs]
        .into_iter()
        .flatten()
        .any(|p| *p < BigDecimal::zero());
    if negativo {
        return Err(AppError::Validacion("Los precios no pueden ser negativos.".to_string()));
    }
    sesiones.disponible(usuario.user_id)?;

    let encontrado = data
        .catalogo
        .buscar(item.tipo.entidad(), item.id, usuario.token())
        .await?
        .ok_or_else(|| {
            AppError::NoEncontrado(format!(
                "No se encontró el {} con ID {}.",
                item.tipo.etiqueta(),
                item.id
            ))
        })?;

    let candidato = Candidato {
        id: item.id,
        tipo: item.tipo,
        nombre: encontrado.nombre,
        cantidad: item.cantidad,
        precio_unitario_usd: item
            .precio_unitario_usd
            .or(encontrado.precio_usd)
            .unwrap_or_else(BigDecimal::zero),
        precio_unitario_bs: item.precio_unitario_bs,
    };

    let (resultado, vista) = sesiones.con_sesion(usuario.user_id, |s| {
        let resultado = s.agregar(candidato, &data.tasa);
        (resultado, armar_vista(s, &data.tasa))
    })?;

    let mensaje = match resultado? {
        ResultadoAgregar::Agregada => "Ítem agregado al carrito.".to_string(),
        ResultadoAgregar::Fusionada { cantidad } => {
            format!("Cantidad actualizada a {}.", cantidad)
        }
        ResultadoAgregar::Ignorada => "El ítem no tiene precio; no se agregó.".to_string(),
    };
    info!(
        transaccion = T::NOMBRE,
        usuario = usuario.user_id,
        id = item.id,
        tipo = item.tipo.etiqueta(),
        "{}",
        mensaje
    );
    Ok(HttpResponse::Ok().json(GenericResponse::exito(mensaje, vista)))
}

async fn quitar_item<T: Transaccion>(
    data: web::Data<AppState>,
    sesiones: web::Data<Sesiones<T>>,
    usuario: AuthenticatedUser,
    path: web::Path<(T::Tipo, i64)>,
) -> Result<HttpResponse, AppError> {
    let (tipo, id) = path.into_inner();
    let (quitado, vista) = sesiones.con_sesion(usuario.user_id, |s| {
        (s.quitar(id, tipo), armar_vista(s, &data.tasa))
    })?;

    let mensaje = if quitado? {
        "Ítem eliminado del carrito."
    } else {
        "El ítem no estaba en el carrito."
    };
    Ok(HttpResponse::Ok().json(GenericResponse::exito(mensaje, vista)))
}

async fn seleccionar_contraparte<T: Transaccion>(
    data: web::Data<AppState>,
    sesiones: web::Data<Sesiones<T>>,
    usuario: AuthenticatedUser,
    seleccion: web::Json<SeleccionContraparte>,
) -> Result<HttpResponse, AppError> {
    sesiones.disponible(usuario.user_id)?;
    if let Some(id) = seleccion.id {
        data.catalogo
            .buscar(T::ENTIDAD_CONTRAPARTE, id, usuario.token())
            .await?
            .ok_or_else(|| {
                AppError::NoEncontrado(format!("No se encontró el {} con ID {}.", T::CONTRAPARTE, id))
            })?;
    }

    let vista = sesiones.con_sesion(usuario.user_id, |s| {
        s.seleccionar_contraparte(seleccion.id)
            .map(|_| armar_vista(s, &data.tasa))
    })??;
    Ok(HttpResponse::Ok().json(GenericResponse::exito(
        format!("Se actualizó el {}.", T::CONTRAPARTE),
        vista,
    )))
}

async fn cancelar<T: Transaccion>(
    data: web::Data<AppState>,
    sesiones: web::Data<Sesiones<T>>,
    usuario: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let vista = sesiones
        .con_sesion(usuario.user_id, |s| s.cancelar().map(|_| armar_vista(s, &data.tasa)))??;
    Ok(HttpResponse::Ok().json(GenericResponse::exito("Formulario descartado.", vista)))
}

async fn enviar<T: Transaccion>(
    data: web::Data<AppState>,
    sesiones: web::Data<Sesiones<T>>,
    usuario: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let creado = enviar_transaccion(
        &sesiones,
        usuario.user_id,
        data.transacciones.as_ref(),
        data.avisos.as_ref(),
        usuario.token(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(GenericResponse::exito(
        format!("La {} se registró con éxito.", T::NOMBRE),
        creado,
    )))
}
