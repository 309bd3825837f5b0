// src/gastos/mod.rs

pub mod gastos_router;
pub mod gastos_structs;
pub mod proyeccion;

pub use gastos_structs::{Frecuencia, GastoRecurrente, Ocurrencia, ProyeccionMensual};
pub use proyeccion::proyectar_mes;
