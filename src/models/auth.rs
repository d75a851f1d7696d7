//! Modelos de autenticación
//!
//! Roles del sistema y claims del JWT.

use serde::{Deserialize, Serialize};

/// Rol del caller - viaja en los claims del JWT
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Rider,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Rider => "RIDER",
            Role::Driver => "DRIVER",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "RIDER" => Some(Role::Rider),
            "DRIVER" => Some(Role::Driver),
            _ => None,
        }
    }
}

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,  // user/driver id
    pub role: String, // RIDER | DRIVER
    pub exp: usize,
    pub iat: usize,
}
