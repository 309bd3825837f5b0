// src/usuarios/usuario_structs.rs

use serde::{Deserialize, Serialize};

/// Payload del JWT emitido por el backend de la tienda al iniciar sesión.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,      // ID del usuario
    pub name: String,  // Nombre a mostrar en el panel
    pub exp: i64,      // Expiración (timestamp Unix)
}
