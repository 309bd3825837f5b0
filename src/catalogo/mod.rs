// src/catalogo/mod.rs

// Consulta de catálogos y datos de referencia (tasa del día)
pub mod catalogo_router;
