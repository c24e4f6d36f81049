#[cfg(feature = "server")]
pub mod config;

pub mod api;

#[cfg(feature = "server")]
pub mod auth;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod identity;

#[cfg(feature = "server")]
pub mod supabase;

#[cfg(feature = "server")]
pub mod telemetry;
