use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Credentials submitted from the login screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SignInRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Ingresa un correo válido"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "La contraseña es obligatoria"))
    )]
    pub password: String,
}
