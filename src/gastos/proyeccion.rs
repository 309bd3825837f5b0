// src/gastos/proyeccion.rs

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, Duration, NaiveDate};

use super::gastos_structs::{Frecuencia, GastoRecurrente, Ocurrencia, ProyeccionMensual};

/// Proyecta los gastos recurrentes sobre un mes y los agrupa por día.
///
/// Devuelve `None` si `mes` no está entre 1 y 12. Los gastos mensuales y
/// anuales cuyo día no existe en el mes caen en el último día.
pub fn proyectar_mes(gastos: &[GastoRecurrente], anio: i32, mes: u32) -> Option<ProyeccionMensual> {
    let primero = NaiveDate::from_ymd_opt(anio, mes, 1)?;
    let ultimo = ultimo_dia(anio, mes)?;

    let mut dias: BTreeMap<NaiveDate, Vec<Ocurrencia>> = BTreeMap::new();
    let mut total_usd = BigDecimal::zero();

    for gasto in gastos {
        let hasta = match gasto.fecha_fin {
            Some(fin) if fin < ultimo => fin,
            _ => ultimo,
        };
        if gasto.fecha_inicio > hasta || hasta < primero {
            continue;
        }

        for fecha in fechas_en_rango(gasto, primero, ultimo, hasta) {
            total_usd += gasto.monto_usd.clone();
            dias.entry(fecha).or_default().push(Ocurrencia {
                gasto_id: gasto.id,
                descripcion: gasto.descripcion.clone(),
                monto_usd: gasto.monto_usd.clone(),
            });
        }
    }

    Some(ProyeccionMensual {
        anio,
        mes,
        dias,
        total_usd,
    })
}

fn fechas_en_rango(
    gasto: &GastoRecurrente,
    primero: NaiveDate,
    ultimo: NaiveDate,
    hasta: NaiveDate,
) -> Vec<NaiveDate> {
    let inicio = gasto.fecha_inicio;
    let en_rango = |f: NaiveDate| f >= primero && f >= inicio && f <= hasta;

    match gasto.frecuencia {
        Frecuencia::Unico => Some(inicio).filter(|f| en_rango(*f)).into_iter().collect(),
        Frecuencia::Semanal => cada_n_dias(inicio, 7, primero, hasta),
        Frecuencia::Quincenal => cada_n_dias(inicio, 15, primero, hasta),
        Frecuencia::Mensual => mismo_dia(inicio.day(), ultimo)
            .filter(|f| en_rango(*f))
            .into_iter()
            .collect(),
        Frecuencia::Anual if inicio.month() == ultimo.month() => mismo_dia(inicio.day(), ultimo)
            .filter(|f| en_rango(*f))
            .into_iter()
            .collect(),
        Frecuencia::Anual => Vec::new(),
    }
}

fn cada_n_dias(inicio: NaiveDate, paso: i64, primero: NaiveDate, hasta: NaiveDate) -> Vec<NaiveDate> {
    let mut fecha = if inicio >= primero {
        inicio
    } else {
        let atraso = (primero - inicio).num_days();
        let saltos = (atraso + paso - 1) / paso;
        inicio + Duration::days(saltos * paso)
    };

    let mut fechas = Vec::new();
    while fecha <= hasta {
        fechas.push(fecha);
        fecha += Duration::days(paso);
    }
    fechas
}

/// El día `dia` del mes de `ultimo`, o el último día si el mes es más corto.
fn mismo_dia(dia: u32, ultimo: NaiveDate) -> Option<NaiveDate> {
    ultimo.with_day(dia.min(ultimo.day()))
}

fn ultimo_dia(anio: i32, mes: u32) -> Option<NaiveDate> {
    let (sig_anio, sig_mes) = if mes == 12 { (anio + 1, 1) } else { (anio, mes + 1) };
    NaiveDate::from_ymd_opt(sig_anio, sig_mes, 1)?.pred_opt()
}
