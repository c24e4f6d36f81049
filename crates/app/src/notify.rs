use dioxus::prelude::ServerFnError;
use dioxus_primitives::toast::{ToastOptions, Toasts};
use shared_types::AppError;

pub const SIGN_IN_SUCCEEDED: &str = "Inicio de sesión exitoso";
pub const SIGN_IN_FAILED: &str = "Error al iniciar sesión";
pub const PROFILE_FAILED: &str = "No se pudo cargar tu perfil";
pub const SIGN_OUT_FAILED: &str = "No se pudo cerrar la sesión en el servidor";

/// User-facing text for a failed server call: the server's own message when
/// it sent an `AppError`, otherwise `fallback`.
pub fn error_message(err: &ServerFnError, fallback: &str) -> String {
    AppError::friendly_message_or(&err.to_string(), fallback)
}

pub fn success(toast: Toasts, message: &str) {
    toast.success(message.to_string(), ToastOptions::new());
}

/// Show a failed server call as an error toast.
pub fn failure(toast: Toasts, err: &ServerFnError, fallback: &str) {
    let message = error_message(err, fallback);
    tracing::warn!(error = %err, "{fallback}");
    toast.error(message, ToastOptions::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let json = serde_json::to_string(&AppError::unauthorized("Credenciales inválidas")).unwrap();
        let err = ServerFnError::new(json);
        assert_eq!(error_message(&err, SIGN_IN_FAILED), "Credenciales inválidas");
    }

    #[test]
    fn opaque_error_uses_fallback() {
        let err = ServerFnError::new("connection reset");
        assert_eq!(error_message(&err, SIGN_IN_FAILED), SIGN_IN_FAILED);
    }
}
