use dioxus::prelude::*;
use model::forms::SignUpForm;
use model::{Gender, RoleType};

use crate::components::{Button, ButtonVariant, Card, Input, Label, Select};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Self-service registration. On success the user is sent to sign in.
#[component]
pub fn SignUpView(on_success: EventHandler<()>, on_navigate_sign_in: EventHandler<()>) -> Element {
    let mut form = use_signal(SignUpForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match form().validate() {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        spawn(async move {
            submitting.set(true);
            error.set(None);
            match api::sign_up(request).await {
                Ok(reply) => {
                    notice.set(Some(reply.message));
                    on_success.call(());
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
                h1 { class: "view-title", "Create an account" }

                form { onsubmit: handle_submit,
                    div { class: "form-grid",
                        div {
                            Label { html_for: "signup-first", "First name" }
                            Input {
                                id: "signup-first",
                                value: form().user.first_name,
                                oninput: move |evt: FormEvent| form.write().user.first_name = evt.value(),
                            }
                        }
                        div {
                            Label { html_for: "signup-last", "Last name" }
                            Input {
                                id: "signup-last",
                                value: form().user.last_name,
                                oninput: move |evt: FormEvent| form.write().user.last_name = evt.value(),
                            }
                        }
                    }
                    div { class: "mb-4",
                        Label { html_for: "signup-email", "Email" }
                        Input {
                            id: "signup-email",
                            r#type: "email",
                            value: form().user.email,
                            oninput: move |evt: FormEvent| form.write().user.email = evt.value(),
                        }
                    }
                    div { class: "mb-4",
                        Label { html_for: "signup-mobile", "Mobile" }
                        Input {
                            id: "signup-mobile",
                            r#type: "tel",
                            value: form().user.mobile,
                            oninput: move |evt: FormEvent| form.write().user.mobile = evt.value(),
                        }
                    }
                    div { class: "form-grid",
                        div {
                            Label { html_for: "signup-gender", "Gender" }
                            Select {
                                id: "signup-gender",
                                value: form().user.gender,
                                onchange: move |evt: FormEvent| form.write().user.gender = evt.value(),
                                for gender in Gender::ALL {
                                    option { value: gender.as_str(), "{gender.label()}" }
                                }
                            }
                        }
                        div {
                            Label { html_for: "signup-role", "Role" }
                            Select {
                                id: "signup-role",
                                value: form().user.role,
                                onchange: move |evt: FormEvent| form.write().user.role = evt.value(),
                                for role in RoleType::ALL {
                                    option { value: role.as_str(), "{role.as_str()}" }
                                }
                            }
                        }
                    }
                    div { class: "form-grid",
                        div {
                            Label { html_for: "signup-password", "Password" }
                            Input {
                                id: "signup-password",
                                r#type: "password",
                                value: form().user.password,
                                oninput: move |evt: FormEvent| form.write().user.password = evt.value(),
                            }
                        }
                        div {
                            Label { html_for: "signup-confirm", "Confirm password" }
                            Input {
                                id: "signup-confirm",
                                r#type: "password",
                                value: form().confirm_password,
                                oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                            }
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "form-error", "{message}" }
                    }
                    if let Some(message) = notice() {
                        p { class: "form-success", "{message}" }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        class: "w-full",
                        disabled: submitting(),
                        if submitting() { "Creating account..." } else { "Sign up" }
                    }
                }

                p { class: "view-muted mt-4",
                    "Already have an account? "
                    a {
                        class: "link",
                        href: "#",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            on_navigate_sign_in.call(());
                        },
                        "Sign in"
                    }
                }
            }
        }
    }
}
