use dioxus::prelude::*;
use model::forms::SignInForm;

use crate::components::{Button, ButtonVariant, Card, Input, Label};
use crate::{use_auth, AuthState};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Email and password sign-in.
#[component]
pub fn SignInView(
    /// Called after a successful sign-in, or when a session already exists.
    on_success: EventHandler<()>,
    on_navigate_sign_up: EventHandler<()>,
) -> Element {
    let mut auth = use_auth();
    let mut form = use_signal(SignInForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_some() {
            on_success.call(());
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let (email, password) = match form().validate() {
            Ok(credentials) => credentials,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        spawn(async move {
            submitting.set(true);
            error.set(None);
            match api::sign_in(email, password).await {
                Ok(session) => {
                    tracing::info!("Signed in as {}", session.user.email);
                    auth.set(AuthState::signed_in(session));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div { class: "auth-page",
            Card { class: "auth-card",
                h1 { class: "view-title", "Sign in" }
                p { class: "view-muted mb-4", "Enter your credentials to access the dashboard." }

                form { onsubmit: handle_submit,
                    div { class: "mb-4",
                        Label { html_for: "signin-email", "Email" }
                        Input {
                            id: "signin-email",
                            r#type: "email",
                            placeholder: "you@example.com",
                            value: form().email,
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                    }
                    div { class: "mb-4",
                        Label { html_for: "signin-password", "Password" }
                        Input {
                            id: "signin-password",
                            r#type: "password",
                            value: form().password,
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "form-error", "{message}" }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        class: "w-full",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign in" }
                    }
                }

                p { class: "view-muted mt-4",
                    "Don't have an account? "
                    a {
                        class: "link",
                        href: "#",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            on_navigate_sign_up.call(());
                        },
                        "Sign up"
                    }
                }
            }
        }
    }
}
