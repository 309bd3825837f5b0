// src/compras/compras_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::backend::Entidad;
use crate::carrito::{LineaCarrito, TipoLinea, Transaccion};

/// Tipos de línea de una compra a proveedor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoCompra {
    Material,
    Producto,
}

impl TipoLinea for TipoCompra {
    const TODOS: &'static [Self] = &[TipoCompra::Material, TipoCompra::Producto];

    fn etiqueta(self) -> &'static str {
        match self {
            TipoCompra::Material => "material",
            TipoCompra::Producto => "producto",
        }
    }

    fn entidad(self) -> Entidad {
        match self {
            TipoCompra::Material => Entidad::Materiales,
            TipoCompra::Producto => Entidad::Productos,
        }
    }
}

/// Línea de material en el cuerpo de `POST compras`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineaMaterialDto {
    pub material_id: i64,
    pub cantidad: BigDecimal,
    pub precio_unitario_bs: BigDecimal,
    pub precio_unitario_usd: BigDecimal,
}

/// Línea de producto en el cuerpo de `POST compras`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineaProductoCompraDto {
    pub producto_id: i64,
    pub cantidad: BigDecimal,
    pub precio_unitario_bs: BigDecimal,
    pub precio_unitario_usd: BigDecimal,
}

/// Cuerpo de creación de una compra. A diferencia de la venta, cada línea
/// lleva sus precios: el costo lo fija la factura del proveedor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompraDto {
    pub proveedor_id: i64,
    pub materiales: Vec<LineaMaterialDto>,
    pub productos: Vec<LineaProductoCompraDto>,
}

impl CompraDto {
    pub fn total_lineas(&self) -> usize {
        self.materiales.len() + self.productos.len()
    }
}

/// Marcador de la transacción de compra.
#[derive(Debug, Clone, Copy)]
pub struct Compra;

impl Transaccion for Compra {
    type Tipo = TipoCompra;
    type Dto = CompraDto;

    const NOMBRE: &'static str = "compra";
    const CONTRAPARTE: &'static str = "proveedor";
    const ENTIDAD_CONTRAPARTE: Entidad = Entidad::Proveedores;
    const RUTA_CREACION: &'static str = "compras";

    fn armar_dto(proveedor_id: i64, lineas: &[LineaCarrito<TipoCompra>]) -> CompraDto {
        let mut materiales = Vec::new();
        let mut productos = Vec::new();

        for linea in lineas {
            match linea.tipo {
                TipoCompra::Material => materiales.push(LineaMaterialDto {
                    material_id: linea.id,
                    cantidad: linea.cantidad.clone(),
                    precio_unitario_bs: linea.precio_unitario_bs.clone(),
                    precio_unitario_usd: linea.precio_unitario_usd.clone(),
                }),
                TipoCompra::Producto => productos.push(LineaProductoCompraDto {
                    producto_id: linea.id,
                    cantidad: linea.cantidad.clone(),
                    precio_unitario_bs: linea.precio_unitario_bs.clone(),
                    precio_unitario_usd: linea.precio_unitario_usd.clone(),
                }),
            }
        }

        CompraDto {
            proveedor_id,
            materiales,
            productos,
        }
    }
}
