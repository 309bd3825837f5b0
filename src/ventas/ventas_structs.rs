// src/ventas/ventas_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::backend::Entidad;
use crate::carrito::{LineaCarrito, TipoLinea, Transaccion};

/// Tipos de línea de una venta a cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoVenta {
    Producto,
    Servicio,
}

impl TipoLinea for TipoVenta {
    const TODOS: &'static [Self] = &[TipoVenta::Producto, TipoVenta::Servicio];

    fn etiqueta(self) -> &'static str {
        match self {
            TipoVenta::Producto => "producto",
            TipoVenta::Servicio => "servicio",
        }
    }

    fn entidad(self) -> Entidad {
        match self {
            TipoVenta::Producto => Entidad::Productos,
            TipoVenta::Servicio => Entidad::Servicios,
        }
    }
}

/// Ítem individual de una venta: solo id y cantidad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineaVentaDto {
    pub id: i64,
    pub cantidad: BigDecimal,
}

/// Cuerpo de `POST ventas`.
///
/// No lleva precios: el backend vuelve a tomar el precio de su catálogo al
/// registrar la venta. Esta asimetría con `CompraDto` es parte del contrato.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentaDto {
    pub cliente_id: i64,
    pub productos: Vec<LineaVentaDto>,
    pub servicios: Vec<LineaVentaDto>,
}

impl VentaDto {
    pub fn total_lineas(&self) -> usize {
        self.productos.len() + self.servicios.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Venta;

impl Transaccion for Venta {
    type Tipo = TipoVenta;
    type Dto = VentaDto;

    const NOMBRE: &'static str = "venta";
    const CONTRAPARTE: &'static str = "cliente";
    const ENTIDAD_CONTRAPARTE: Entidad = Entidad::Clientes;
    const RUTA_CREACION: &'static str = "ventas";

    fn armar_dto(cliente_id: i64, lineas: &[LineaCarrito<TipoVenta>]) -> VentaDto {
        let (productos, servicios): (Vec<_>, Vec<_>) = lineas
            .iter()
            .partition(|l| l.tipo == TipoVenta::Producto);

        let a_dto = |l: &LineaCarrito<TipoVenta>| LineaVentaDto {
            id: l.id,
            cantidad: l.cantidad.clone(),
        };

        VentaDto {
            cliente_id,
            productos: productos.into_iter().map(a_dto).collect(),
            servicios: servicios.into_iter().map(a_dto).collect(),
        }
    }
}
