//! Backend en memoria y helpers compartidos por las pruebas de rutas.

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::{json, Value};
use tokio::sync::Notify;

use cerrajeria_w::backend::{
    AvisoStock, Catalogo, ConsultaPagina, Entidad, ErrorRemoto, FuenteGastos, ItemCatalogo,
    Pagina, ServicioTransacciones,
};
use cerrajeria_w::carrito::TasaCambio;
use cerrajeria_w::config::AuthConfig;
use cerrajeria_w::gastos::GastoRecurrente;
use cerrajeria_w::AppState;

pub const SECRETO: &str = "secreto-de-pruebas";

/// Llamada registrada a un endpoint de creación.
#[derive(Debug, Clone)]
pub struct Creacion {
    pub ruta: String,
    pub cuerpo: Value,
    pub token: Option<String>,
}

#[derive(Default)]
pub struct FakeBackend {
    catalogo: Mutex<HashMap<(Entidad, i64), ItemCatalogo>>,
    pub creaciones: Mutex<Vec<Creacion>>,
    /// Si está definido, el próximo `crear` falla con este error.
    pub proximo_error: Mutex<Option<ErrorRemoto>>,
    pub avisos: AtomicUsize,
    pub gastos: Mutex<Vec<GastoRecurrente>>,
    /// Consultas de ítems individuales al catálogo.
    pub busquedas: AtomicUsize,
    /// Si está definido, `crear` espera una notificación antes de responder.
    bloqueo: Mutex<Option<Arc<Notify>>>,
}

impl FakeBackend {
    /// Catálogo de una cerrajería pequeña.
    pub fn con_catalogo() -> Arc<Self> {
        let fake = FakeBackend::default();
        fake.item(Entidad::Materiales, 1, "Cilindro de latón", Some("5.00"));
        fake.item(Entidad::Materiales, 2, "Resorte", Some("0.25"));
        fake.item(Entidad::Materiales, 3, "Muestra sin precio", None);
        fake.item(Entidad::Productos, 2, "Cerradura multipunto", Some("10.00"));
        fake.item(Entidad::Servicios, 5, "Apertura de puerta", Some("15.00"));
        fake.item(Entidad::Proveedores, 8, "Ferretería El Tornillo", None);
        fake.item(Entidad::Clientes, 3, "María Pérez", None);
        Arc::new(fake)
    }

    pub fn item(&self, entidad: Entidad, id: i64, nombre: &str, precio: Option<&str>) {
        self.catalogo.lock().unwrap().insert(
            (entidad, id),
            ItemCatalogo {
                id,
                nombre: nombre.to_string(),
                precio_usd: precio.map(|p| BigDecimal::from_str(p).unwrap()),
            },
        );
    }

    pub fn fallar_proxima_creacion(&self, error: ErrorRemoto) {
        *self.proximo_error.lock().unwrap() = Some(error);
    }

    /// Retiene las creaciones hasta que se notifique el `Notify` devuelto.
    pub fn retener_creaciones(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.bloqueo.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn busquedas(&self) -> usize {
        self.busquedas.load(Ordering::SeqCst)
    }

    pub fn creaciones(&self) -> Vec<Creacion> {
        self.creaciones.lock().unwrap().clone()
    }

    pub fn avisos(&self) -> usize {
        self.avisos.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalogo for FakeBackend {
    async fn listar(
        &self,
        entidad: Entidad,
        consulta: &ConsultaPagina,
        _token: Option<&str>,
    ) -> Result<Pagina<ItemCatalogo>, ErrorRemoto> {
        let mut data: Vec<ItemCatalogo> = self
            .catalogo
            .lock()
            .unwrap()
            .iter()
            .filter(|((e, _), _)| *e == entidad)
            .map(|(_, item)| item.clone())
            .collect();
        data.sort_by_key(|i| i.id);
        Ok(Pagina {
            total: data.len() as u64,
            data,
            page: consulta.page,
            per_page: consulta.per_page,
        })
    }

    async fn buscar(
        &self,
        entidad: Entidad,
        id: i64,
        _token: Option<&str>,
    ) -> Result<Option<ItemCatalogo>, ErrorRemoto> {
        self.busquedas.fetch_add(1, Ordering::SeqCst);
        Ok(self.catalogo.lock().unwrap().get(&(entidad, id)).cloned())
    }
}

#[async_trait]
impl ServicioTransacciones for FakeBackend {
    async fn crear(
        &self,
        ruta: &str,
        cuerpo: &Value,
        token: Option<&str>,
    ) -> Result<Value, ErrorRemoto> {
        let bloqueo = self.bloqueo.lock().unwrap().clone();
        if let Some(notify) = bloqueo {
            notify.notified().await;
        }
        if let Some(error) = self.proximo_error.lock().unwrap().take() {
            return Err(error);
        }
        let mut creaciones = self.creaciones.lock().unwrap();
        creaciones.push(Creacion {
            ruta: ruta.to_string(),
            cuerpo: cuerpo.clone(),
            token: token.map(str::to_string),
        });
        Ok(json!({ "id": creaciones.len() }))
    }
}

#[async_trait]
impl AvisoStock for FakeBackend {
    async fn refrescar(&self, _token: Option<&str>) -> Result<(), ErrorRemoto> {
        self.avisos.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl FuenteGastos for FakeBackend {
    async fn listar_gastos(&self, _token: Option<&str>) -> Result<Vec<GastoRecurrente>, ErrorRemoto> {
        Ok(self.gastos.lock().unwrap().clone())
    }
}

pub fn auth_desactivada() -> AuthConfig {
    AuthConfig::default()
}

pub fn auth_activada() -> AuthConfig {
    AuthConfig {
        enabled: true,
        jwt_secret: SECRETO.to_string(),
    }
}

pub fn estado(fake: Arc<FakeBackend>, auth: AuthConfig) -> actix_web::web::Data<AppState> {
    actix_web::web::Data::new(AppState {
        tasa: TasaCambio::from_str("40.00").unwrap(),
        auth,
        catalogo: fake.clone(),
        transacciones: fake.clone(),
        avisos: fake.clone(),
        gastos: fake,
    })
}

/// Compara un monto serializado como texto con un valor esperado.
pub fn monto(valor: &Value) -> BigDecimal {
    match valor {
        Value::String(s) => BigDecimal::from_str(s).unwrap(),
        otro => BigDecimal::from_str(&otro.to_string()).unwrap(),
    }
}

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Levanta la app completa con el backend falso indicado.
macro_rules! app {
    ($fake:expr, $auth:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(support::estado($fake.clone(), $auth))
                .app_data(actix_web::web::Data::new(
                    cerrajeria_w::envio::Sesiones::<cerrajeria_w::compras::Compra>::new(
                        cerrajeria_w::carrito::PoliticaFusion::Sumar,
                    ),
                ))
                .app_data(actix_web::web::Data::new(
                    cerrajeria_w::envio::Sesiones::<cerrajeria_w::ventas::Venta>::new(
                        cerrajeria_w::carrito::PoliticaFusion::Sumar,
                    ),
                ))
                .configure(cerrajeria_w::configurar_rutas),
        )
        .await
    };
}
