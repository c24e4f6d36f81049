use dioxus::prelude::ServerFnError;
use shared_types::AppError;

use crate::supabase::SupabaseError;

/// Convert a backend client error into an AppError.
pub fn supabase_to_app_error(err: SupabaseError) -> AppError {
    match &err {
        SupabaseError::Config(msg) => {
            tracing::error!(%msg, "backend not configured");
            AppError::internal("El servicio no está configurado")
        }
        SupabaseError::Http(e) => {
            tracing::warn!(error = %e, "backend unreachable");
            AppError::upstream("No se pudo contactar al servidor")
        }
        SupabaseError::Decode(msg) => {
            tracing::error!(%msg, "unexpected backend response");
            AppError::upstream("Respuesta inesperada del servidor")
        }
        SupabaseError::Api { status, message, .. } => match status {
            401 => AppError::unauthorized(message.clone()),
            403 => AppError::forbidden(message.clone()),
            404 => AppError::not_found(message.clone()),
            400..=499 => AppError::bad_request(message.clone()),
            _ => {
                tracing::warn!(status, %message, "backend error");
                AppError::upstream("El servidor no pudo completar la solicitud")
            }
        },
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on SupabaseError.
pub trait SupabaseErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SupabaseErrorExt for SupabaseError {
    fn into_app_error(self) -> AppError {
        supabase_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
