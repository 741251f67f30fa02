//! Sign-in and sign-up pages.

use dioxus::prelude::*;
use ui::views::{SignInView, SignUpView};
use ui::{toast_success, use_toasts};

use crate::Route;

#[component]
pub fn SignIn() -> Element {
    let nav = use_navigator();

    rsx! {
        SignInView {
            on_success: move |_| {
                nav.replace(Route::Dashboard {});
            },
            on_navigate_sign_up: move |_| {
                nav.push(Route::SignUp {});
            },
        }
    }
}

#[component]
pub fn SignUp() -> Element {
    let nav = use_navigator();
    let mut toasts = use_toasts();

    rsx! {
        SignUpView {
            on_success: move |_| {
                toast_success(&mut toasts, "Registration successful", Some("Please sign in."));
                nav.push(Route::SignIn {});
            },
            on_navigate_sign_in: move |_| {
                nav.push(Route::SignIn {});
            },
        }
    }
}
