use crate::identity::use_identity;
use crate::notify;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdShield;
use dioxus_free_icons::Icon;
use dioxus_primitives::toast::use_toast;
use shared_types::AppError;
use std::collections::HashMap;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Login page. On success the session guard moves the user to the dashboard.
#[component]
pub fn Login() -> Element {
    let identity = use_identity();
    let toast = use_toast();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        let identity = identity.clone();
        async move {
            evt.prevent_default();
            loading.set(true);
            field_errors.set(HashMap::new());

            match identity.sign_in(email(), password()).await {
                Ok(_) => notify::success(toast, notify::SIGN_IN_SUCCEEDED),
                Err(e) => {
                    field_errors.set(AppError::parse_field_errors(&e.to_string()));
                    notify::failure(toast, &e, notify::SIGN_IN_FAILED);
                }
            }
            loading.set(false);
        }
    };

    let email_error = field_errors.read().get("email").cloned();
    let password_error = field_errors.read().get("password").cloned();

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                div { class: "auth-brand",
                    Icon::<LdShield> { icon: LdShield, width: 40, height: 40 }
                    h1 { "SICOF Núcleo" }
                    p { "Sistema de Control Fronterizo" }
                }

                form { class: "auth-form", onsubmit: handle_login,
                    label { r#for: "email", "Correo Electrónico" }
                    input {
                        id: "email",
                        r#type: "email",
                        autocomplete: "username",
                        placeholder: "usuario@carabineros.cl",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                    if let Some(err) = email_error {
                        p { class: "field-error", "{err}" }
                    }

                    label { r#for: "password", "Contraseña" }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    if let Some(err) = password_error {
                        p { class: "field-error", "{err}" }
                    }

                    button {
                        class: "auth-submit",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Ingresando..." } else { "Iniciar Sesión" }
                    }
                }
            }
            p { class: "auth-footer", "SICOF v{APP_VERSION}" }
        }
    }
}
