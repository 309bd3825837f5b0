// src/carrito/lineas.rs

use bigdecimal::{BigDecimal, Zero};
use tracing::debug;

use super::carrito_structs::{
    Candidato, LineaCarrito, PoliticaFusion, ResultadoAgregar, TasaCambio, TipoLinea,
};
use super::errores::ErrorCarrito;

/// Carrito de una compra o venta en curso.
///
/// Vive lo mismo que el formulario de creación: nace vacío, se edita con
/// `agregar`/`quitar` y se descarta al registrar o cancelar. Hay a lo sumo
/// una línea por par `(id, tipo)` y se conserva el orden de inserción.
#[derive(Debug, Clone, PartialEq)]
pub struct Carrito<K> {
    lineas: Vec<LineaCarrito<K>>,
    politica: PoliticaFusion,
}

impl<K: TipoLinea> Default for Carrito<K> {
    fn default() -> Self {
        Carrito::new(PoliticaFusion::default())
    }
}

impl<K: TipoLinea> Carrito<K> {
    pub fn new(politica: PoliticaFusion) -> Self {
        Carrito {
            lineas: Vec::new(),
            politica,
        }
    }

    pub fn politica(&self) -> PoliticaFusion {
        self.politica
    }

    pub fn lineas(&self) -> &[LineaCarrito<K>] {
        &self.lineas
    }

    pub fn len(&self) -> usize {
        self.lineas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineas.is_empty()
    }

    pub fn buscar(&self, id: i64, tipo: K) -> Option<&LineaCarrito<K>> {
        self.lineas.iter().find(|l| l.id == id && l.tipo == tipo)
    }

    /// Agrega un candidato o lo fusiona con la línea existente del mismo
    /// `(id, tipo)` según la política del carrito.
    ///
    /// El precio en bolívares, si no viene explícito, se deriva como
    /// `precio_usd * tasa`. Un ítem sin precio en ambas monedas no altera el
    /// carrito.
    pub fn agregar(
        &mut self,
        candidato: Candidato<K>,
        tasa: &TasaCambio,
    ) -> Result<ResultadoAgregar, ErrorCarrito> {
        if candidato.cantidad <= BigDecimal::zero() {
            return Err(ErrorCarrito::CantidadInvalida);
        }

        let precio_bs = candidato
            .precio_unitario_bs
            .unwrap_or_else(|| tasa.a_bolivares(&candidato.precio_unitario_usd));

        if candidato.precio_unitario_usd.is_zero() && precio_bs.is_zero() {
            debug!(id = candidato.id, tipo = ?candidato.tipo, "ítem sin precio ignorado");
            return Ok(ResultadoAgregar::Ignorada);
        }

        let politica = self.politica;
        if let Some(existente) = self
            .lineas
            .iter_mut()
            .find(|l| l.id == candidato.id && l.tipo == candidato.tipo)
        {
            existente.cantidad = match politica {
                PoliticaFusion::Sumar => &existente.cantidad + &candidato.cantidad,
                PoliticaFusion::Reemplazar => candidato.cantidad,
            };
            return Ok(ResultadoAgregar::Fusionada {
                cantidad: existente.cantidad.clone(),
            });
        }

        self.lineas.push(LineaCarrito {
            id: candidato.id,
            tipo: candidato.tipo,
            nombre: candidato.nombre,
            cantidad: candidato.cantidad,
            precio_unitario_usd: candidato.precio_unitario_usd,
            precio_unitario_bs: precio_bs,
        });
        Ok(ResultadoAgregar::Agregada)
    }

    /// Quita la línea `(id, tipo)`. Devuelve `false` si no estaba.
    pub fn quitar(&mut self, id: i64, tipo: K) -> bool {
        let antes = self.lineas.len();
        self.lineas.retain(|l| !(l.id == id && l.tipo == tipo));
        self.lineas.len() != antes
    }

    pub fn vaciar(&mut self) {
        self.lineas.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::compras::TipoCompra;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn tasa() -> TasaCambio {
        TasaCambio::from_str("40.00").unwrap()
    }

    fn candidato(id: i64, tipo: TipoCompra, cantidad: &str, usd: &str) -> Candidato<TipoCompra> {
        Candidato {
            id,
            tipo,
            nombre: format!("item {}", id),
            cantidad: dec(cantidad),
            precio_unitario_usd: dec(usd),
            precio_unitario_bs: None,
        }
    }

    #[test]
    fn pares_distintos_generan_una_linea_cada_uno() {
        let mut carrito = Carrito::default();
        let pares = [
            (1, TipoCompra::Material),
            (1, TipoCompra::Producto),
            (2, TipoCompra::Material),
            (3, TipoCompra::Producto),
        ];
        for (id, tipo) in pares {
            let r = carrito.agregar(candidato(id, tipo, "1", "2.50"), &tasa()).unwrap();
            assert_eq!(r, ResultadoAgregar::Agregada);
        }
        assert_eq!(carrito.len(), pares.len());
    }

    #[test]
    fn agregar_dos_veces_suma_cantidades() {
        let mut carrito = Carrito::new(PoliticaFusion::Sumar);
        carrito
            .agregar(candidato(1, TipoCompra::Material, "2", "5"), &tasa())
            .unwrap();
        let r = carrito
            .agregar(candidato(1, TipoCompra::Material, "3", "5"), &tasa())
            .unwrap();

        assert_eq!(r, ResultadoAgregar::Fusionada { cantidad: dec("5") });
        assert_eq!(carrito.len(), 1);
        assert_eq!(carrito.lineas()[0].cantidad, dec("5"));
    }

    #[test]
    fn politica_reemplazar_fija_la_ultima_cantidad() {
        let mut carrito = Carrito::new(PoliticaFusion::Reemplazar);
        carrito
            .agregar(candidato(1, TipoCompra::Material, "2", "5"), &tasa())
            .unwrap();
        carrito
            .agregar(candidato(1, TipoCompra::Material, "3", "5"), &tasa())
            .unwrap();

        assert_eq!(carrito.len(), 1);
        assert_eq!(carrito.lineas()[0].cantidad, dec("3"));
    }

    #[test]
    fn fusion_conserva_nombre_y_precios_originales() {
        let mut carrito = Carrito::default();
        carrito
            .agregar(candidato(7, TipoCompra::Producto, "1", "10"), &tasa())
            .unwrap();
        let mut otro = candidato(7, TipoCompra::Producto, "1", "99");
        otro.nombre = "otro nombre".to_string();
        carrito.agregar(otro, &tasa()).unwrap();

        let linea = carrito.buscar(7, TipoCompra::Producto).unwrap();
        assert_eq!(linea.nombre, "item 7");
        assert_eq!(linea.precio_unitario_usd, dec("10"));
    }

    #[test]
    fn cantidad_no_positiva_es_rechazada() {
        let mut carrito = Carrito::default();
        for cantidad in ["0", "-1"] {
            let err = carrito
                .agregar(candidato(1, TipoCompra::Material, cantidad, "5"), &tasa())
                .unwrap_err();
            assert_eq!(err, ErrorCarrito::CantidadInvalida);
        }
        assert!(carrito.is_empty());
    }

    #[test]
    fn item_sin_precio_no_altera_el_carrito() {
        let mut carrito = Carrito::default();
        let r = carrito
            .agregar(candidato(1, TipoCompra::Material, "2", "0"), &tasa())
            .unwrap();
        assert_eq!(r, ResultadoAgregar::Ignorada);
        assert!(carrito.is_empty());
    }

    #[test]
    fn precio_en_bolivares_explicito_o_derivado() {
        let mut carrito = Carrito::default();
        carrito
            .agregar(candidato(1, TipoCompra::Material, "1", "2.5"), &tasa())
            .unwrap();
        let mut explicito = candidato(2, TipoCompra::Material, "1", "2.5");
        explicito.precio_unitario_bs = Some(dec("95"));
        carrito.agregar(explicito, &tasa()).unwrap();

        assert_eq!(carrito.lineas()[0].precio_unitario_bs, dec("100"));
        assert_eq!(carrito.lineas()[1].precio_unitario_bs, dec("95"));
    }

    #[test]
    fn solo_precio_en_bolivares_es_suficiente() {
        let mut carrito = Carrito::default();
        let mut c = candidato(1, TipoCompra::Material, "1", "0");
        c.precio_unitario_bs = Some(dec("12"));
        let r = carrito.agregar(c, &tasa()).unwrap();
        assert_eq!(r, ResultadoAgregar::Agregada);
    }

    #[test]
    fn quitar_par_ausente_no_cambia_nada() {
        let mut carrito = Carrito::default();
        carrito
            .agregar(candidato(1, TipoCompra::Material, "2", "5"), &tasa())
            .unwrap();
        let antes = carrito.clone();

        assert!(!carrito.quitar(1, TipoCompra::Producto));
        assert!(!carrito.quitar(9, TipoCompra::Material));
        assert_eq!(carrito, antes);
    }

    #[test]
    fn quitar_solo_afecta_al_par_indicado() {
        let mut carrito = Carrito::default();
        carrito
            .agregar(candidato(1, TipoCompra::Material, "2", "5"), &tasa())
            .unwrap();
        carrito
            .agregar(candidato(1, TipoCompra::Producto, "1", "10"), &tasa())
            .unwrap();

        assert!(carrito.quitar(1, TipoCompra::Material));
        assert_eq!(carrito.len(), 1);
        assert_eq!(carrito.lineas()[0].tipo, TipoCompra::Producto);
    }
}
