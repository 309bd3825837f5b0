// src/envio/sesion.rs

use std::marker::PhantomData;

use serde::Serialize;

use crate::carrito::{
    a_dto_creacion, Candidato, Carrito, ErrorCarrito, PoliticaFusion, ResultadoAgregar, TasaCambio,
    Transaccion,
};

/// Estado del envío de una transacción al backend.
///
/// `Inactivo -> Enviando -> (Inactivo | Fallido)`. Un envío exitoso vuelve
/// directo a `Inactivo` con el carrito vacío; `Fallido` vuelve a `Inactivo`
/// con la siguiente acción del usuario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum EstadoEnvio {
    Inactivo,
    Enviando,
    Fallido { mensaje: String },
}

/// Formulario de creación en curso de un usuario: carrito, contraparte
/// elegida y estado del envío.
#[derive(Debug)]
pub struct SesionTransaccion<T: Transaccion> {
    carrito: Carrito<T::Tipo>,
    contraparte: Option<i64>,
    estado: EstadoEnvio,
    _transaccion: PhantomData<T>,
}

impl<T: Transaccion> SesionTransaccion<T> {
    pub fn new(politica: PoliticaFusion) -> Self {
        SesionTransaccion {
            carrito: Carrito::new(politica),
            contraparte: None,
            estado: EstadoEnvio::Inactivo,
            _transaccion: PhantomData,
        }
    }

    pub fn carrito(&self) -> &Carrito<T::Tipo> {
        &self.carrito
    }

    pub fn contraparte(&self) -> Option<i64> {
        self.contraparte
    }

    pub fn estado(&self) -> &EstadoEnvio {
        &self.estado
    }

    /// El botón de registrar se habilita solo con ítems y contraparte.
    pub fn puede_enviar(&self) -> bool {
        self.estado != EstadoEnvio::Enviando && !self.carrito.is_empty() && self.contraparte.is_some()
    }

    /// Sin ítems, sin contraparte y sin estado pendiente: equivale a una
    /// sesión nueva.
    pub fn es_descartable(&self) -> bool {
        self.estado == EstadoEnvio::Inactivo && self.carrito.is_empty() && self.contraparte.is_none()
    }

    /// Toda acción del usuario pasa por aquí: se rechaza durante un envío y
    /// limpia un fallo anterior.
    fn iniciar_accion(&mut self) -> Result<(), ErrorCarrito> {
        match self.estado {
            EstadoEnvio::Enviando => Err(ErrorCarrito::EnvioEnCurso),
            EstadoEnvio::Fallido { .. } => {
                self.estado = EstadoEnvio::Inactivo;
                Ok(())
            }
            EstadoEnvio::Inactivo => Ok(()),
        }
    }

    pub fn agregar(
        &mut self,
        candidato: Candidato<T::Tipo>,
        tasa: &TasaCambio,
    ) -> Result<ResultadoAgregar, ErrorCarrito> {
        self.iniciar_accion()?;
        self.carrito.agregar(candidato, tasa)
    }

    pub fn quitar(&mut self, id: i64, tipo: T::Tipo) -> Result<bool, ErrorCarrito> {
        self.iniciar_accion()?;
        Ok(self.carrito.quitar(id, tipo))
    }

    pub fn seleccionar_contraparte(&mut self, contraparte: Option<i64>) -> Result<(), ErrorCarrito> {
        self.iniciar_accion()?;
        self.contraparte = contraparte;
        Ok(())
    }

    /// Descarta el formulario: carrito y contraparte.
    pub fn cancelar(&mut self) -> Result<(), ErrorCarrito> {
        self.iniciar_accion()?;
        self.carrito.vaciar();
        self.contraparte = None;
        Ok(())
    }

    /// Valida y pasa a `Enviando`. Si la validación falla el estado no
    /// cambia y no debe llamarse al backend.
    pub fn preparar_envio(&mut self) -> Result<T::Dto, ErrorCarrito> {
        self.iniciar_accion()?;
        let dto = a_dto_creacion::<T>(&self.carrito, self.contraparte)?;
        self.estado = EstadoEnvio::Enviando;
        Ok(dto)
    }

    /// Aplica el resultado del envío: el éxito limpia todo, el fallo conserva
    /// carrito y contraparte para reintentar.
    pub fn concluir_envio(&mut self, resultado: Result<(), String>) {
        match resultado {
            Ok(()) => {
                self.carrito.vaciar();
                self.contraparte = None;
                self.estado = EstadoEnvio::Inactivo;
            }
            Err(mensaje) => {
                self.estado = EstadoEnvio::Fallido { mensaje };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::compras::{Compra, TipoCompra};

    fn tasa() -> TasaCambio {
        TasaCambio::from_str("40").unwrap()
    }

    fn material(id: i64) -> Candidato<TipoCompra> {
        Candidato {
            id,
            tipo: TipoCompra::Material,
            nombre: "Cerradura".to_string(),
            cantidad: BigDecimal::from(2),
            precio_unitario_usd: BigDecimal::from_str("5.00").unwrap(),
            precio_unitario_bs: None,
        }
    }

    fn sesion_lista() -> SesionTransaccion<Compra> {
        let mut sesion = SesionTransaccion::<Compra>::new(PoliticaFusion::Sumar);
        sesion.agregar(material(1), &tasa()).unwrap();
        sesion.seleccionar_contraparte(Some(8)).unwrap();
        sesion
    }

    #[test]
    fn solo_se_puede_enviar_con_items_y_proveedor() {
        let mut sesion = SesionTransaccion::<Compra>::new(PoliticaFusion::Sumar);
        assert!(!sesion.puede_enviar());
        sesion.agregar(material(1), &tasa()).unwrap();
        assert!(!sesion.puede_enviar());
        sesion.seleccionar_contraparte(Some(8)).unwrap();
        assert!(sesion.puede_enviar());
    }

    #[test]
    fn validacion_fallida_no_cambia_el_estado() {
        let mut sesion = SesionTransaccion::<Compra>::new(PoliticaFusion::Sumar);
        assert_eq!(sesion.preparar_envio().unwrap_err(), ErrorCarrito::SinContraparte("proveedor"));
        sesion.seleccionar_contraparte(Some(8)).unwrap();
        assert_eq!(sesion.preparar_envio().unwrap_err(), ErrorCarrito::CarritoVacio);
        assert_eq!(sesion.estado(), &EstadoEnvio::Inactivo);
    }

    #[test]
    fn durante_el_envio_el_formulario_queda_bloqueado() {
        let mut sesion = sesion_lista();
        sesion.preparar_envio().unwrap();

        assert_eq!(sesion.estado(), &EstadoEnvio::Enviando);
        assert!(!sesion.puede_enviar());
        assert_eq!(sesion.agregar(material(2), &tasa()).unwrap_err(), ErrorCarrito::EnvioEnCurso);
        assert_eq!(sesion.quitar(1, TipoCompra::Material).unwrap_err(), ErrorCarrito::EnvioEnCurso);
        assert_eq!(sesion.seleccionar_contraparte(None).unwrap_err(), ErrorCarrito::EnvioEnCurso);
        assert_eq!(sesion.cancelar().unwrap_err(), ErrorCarrito::EnvioEnCurso);
        assert_eq!(sesion.preparar_envio().unwrap_err(), ErrorCarrito::EnvioEnCurso);
        assert_eq!(sesion.carrito().len(), 1);
    }

    #[test]
    fn exito_limpia_carrito_y_proveedor() {
        let mut sesion = sesion_lista();
        sesion.preparar_envio().unwrap();
        sesion.concluir_envio(Ok(()));

        assert!(sesion.carrito().is_empty());
        assert_eq!(sesion.contraparte(), None);
        assert_eq!(sesion.estado(), &EstadoEnvio::Inactivo);
    }

    #[test]
    fn fallo_conserva_todo_y_permite_reintentar() {
        let mut sesion = sesion_lista();
        let primer_dto = sesion.preparar_envio().unwrap();
        sesion.concluir_envio(Err("Proveedor inactivo".to_string()));

        assert_eq!(
            sesion.estado(),
            &EstadoEnvio::Fallido {
                mensaje: "Proveedor inactivo".to_string()
            }
        );
        assert_eq!(sesion.carrito().len(), 1);
        assert_eq!(sesion.contraparte(), Some(8));

        let reintento = sesion.preparar_envio().unwrap();
        assert_eq!(reintento, primer_dto);
        assert_eq!(sesion.estado(), &EstadoEnvio::Enviando);
    }

    #[test]
    fn la_siguiente_accion_despeja_el_fallo() {
        let mut sesion = sesion_lista();
        sesion.preparar_envio().unwrap();
        sesion.concluir_envio(Err("sin conexión".to_string()));

        sesion.agregar(material(1), &tasa()).unwrap();
        assert_eq!(sesion.estado(), &EstadoEnvio::Inactivo);
        assert_eq!(sesion.carrito().lineas()[0].cantidad, BigDecimal::from(4));
    }

    #[test]
    fn cancelar_descarta_el_formulario() {
        let mut sesion = sesion_lista();
        sesion.cancelar().unwrap();
        assert!(sesion.carrito().is_empty());
        assert_eq!(sesion.contraparte(), None);
    }
}
