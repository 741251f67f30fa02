use dioxus::prelude::*;
use model::forms::PasswordForm;
use model::{AppearanceSettings, Density, Gender, NotificationSettings, ProfileUpdate, Theme};

use crate::components::{Button, ButtonVariant, Card, Checkbox, Input, Label, Select, Spinner};
use crate::icons::{FaBell, FaCircleHalfStroke, FaLock, FaMoon, FaPalette, FaSun, FaUser};
use crate::{apply_appearance, toast_error, toast_success, use_auth, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsTab {
    Account,
    Security,
    Notifications,
    Appearance,
}

impl SettingsTab {
    const ALL: [SettingsTab; 4] = [
        SettingsTab::Account,
        SettingsTab::Security,
        SettingsTab::Notifications,
        SettingsTab::Appearance,
    ];

    fn label(&self) -> &'static str {
        match self {
            SettingsTab::Account => "Account",
            SettingsTab::Security => "Security",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Appearance => "Appearance",
        }
    }
}

/// Account, password, notification and appearance settings of the signed-in
/// user.
#[component]
pub fn SettingsView() -> Element {
    let mut toasts = use_toasts();
    let mut tab = use_signal(|| SettingsTab::Account);

    let settings = use_resource(move || async move {
        api::get_settings().await.map_err(|e| {
            toast_error(&mut toasts, "Error", &e.to_string());
            e.to_string()
        })
    });

    let current = tab();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div { class: "view-page max-w-3xl mx-auto w-full",
            h1 { class: "view-title", "Settings" }

            div { class: "tabs",
                for item in SettingsTab::ALL {
                    button {
                        key: "{item.label()}",
                        class: if item == current { "tab tab-active" } else { "tab" },
                        onclick: move |_| tab.set(item),
                        match item {
                            SettingsTab::Account => rsx! { Icon { icon: FaUser, width: 14, height: 14 } },
                            SettingsTab::Security => rsx! { Icon { icon: FaLock, width: 14, height: 14 } },
                            SettingsTab::Notifications => rsx! { Icon { icon: FaBell, width: 14, height: 14 } },
                            SettingsTab::Appearance => rsx! { Icon { icon: FaPalette, width: 14, height: 14 } },
                        }
                        span { "{item.label()}" }
                    }
                }
            }

            match &*settings.read() {
                None => rsx! { Spinner { label: "Loading settings..." } },
                Some(Err(_)) => rsx! {
                    p { class: "view-muted", "Settings could not be loaded." }
                },
                Some(Ok(loaded)) => match current {
                    SettingsTab::Account => rsx! { AccountSection { initial: loaded.profile() } },
                    SettingsTab::Security => rsx! { SecuritySection {} },
                    SettingsTab::Notifications => rsx! {
                        NotificationsSection { initial: loaded.notification_settings.clone() }
                    },
                    SettingsTab::Appearance => rsx! {
                        AppearanceSection { initial: loaded.appearance_settings }
                    },
                },
            }
        }
    }
}

#[component]
fn AccountSection(initial: ProfileUpdate) -> Element {
    let mut toasts = use_toasts();
    let mut auth = use_auth();
    let mut form = use_signal(|| initial.clone());
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let profile = form();
        if profile.first_name.trim().is_empty()
            || profile.last_name.trim().is_empty()
            || profile.email.trim().is_empty()
        {
            toast_error(&mut toasts, "Error", "Please fill in all required fields");
            return;
        }
        spawn(async move {
            saving.set(true);
            match api::update_profile(profile).await {
                Ok(updated) => {
                    if let Some(session) = auth.write().user.as_mut() {
                        session.user.email = updated.email.clone();
                        session.user.first_name = updated.first_name.clone();
                        session.user.last_name = updated.last_name.clone();
                        session.user.mobile = updated.mobile.clone();
                    }
                    form.set(updated.profile());
                    toast_success(&mut toasts, "Profile updated", None);
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card { class: "settings-card",
            h2 { class: "view-section-title", "Profile" }
            form { onsubmit: handle_save,
                div { class: "form-grid",
                    div {
                        Label { html_for: "profile-first", "First name" }
                        Input {
                            id: "profile-first",
                            value: form().first_name,
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "profile-last", "Last name" }
                        Input {
                            id: "profile-last",
                            value: form().last_name,
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "profile-email", "Email" }
                    Input {
                        id: "profile-email",
                        r#type: "email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div { class: "form-grid",
                    div {
                        Label { html_for: "profile-mobile", "Mobile" }
                        Input {
                            id: "profile-mobile",
                            r#type: "tel",
                            value: form().mobile,
                            oninput: move |evt: FormEvent| form.write().mobile = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "profile-gender", "Gender" }
                        Select {
                            id: "profile-gender",
                            value: form().gender,
                            onchange: move |evt: FormEvent| form.write().gender = evt.value(),
                            for gender in Gender::ALL {
                                option { value: gender.as_str(), "{gender.label()}" }
                            }
                        }
                    }
                }
                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save changes" }
                    }
                }
            }
        }
    }
}

#[component]
fn SecuritySection() -> Element {
    let mut toasts = use_toasts();
    let mut form = use_signal(PasswordForm::default);
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let update = match form().validate() {
            Ok(update) => update,
            Err(e) => {
                toast_error(&mut toasts, "Error", &e.to_string());
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match api::update_password(update).await {
                Ok(reply) => {
                    form.set(PasswordForm::default());
                    toast_success(&mut toasts, "Success", Some(&reply.message));
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card { class: "settings-card",
            h2 { class: "view-section-title", "Change password" }
            form { onsubmit: handle_save,
                div { class: "mb-4",
                    Label { html_for: "password-current", "Current password" }
                    Input {
                        id: "password-current",
                        r#type: "password",
                        value: form().current_password,
                        oninput: move |evt: FormEvent| form.write().current_password = evt.value(),
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "password-new", "New password" }
                    Input {
                        id: "password-new",
                        r#type: "password",
                        value: form().new_password,
                        oninput: move |evt: FormEvent| form.write().new_password = evt.value(),
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "password-confirm", "Confirm new password" }
                    Input {
                        id: "password-confirm",
                        r#type: "password",
                        value: form().confirm_password,
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                }
                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Updating..." } else { "Update password" }
                    }
                }
            }
        }
    }
}

#[component]
fn NotificationsSection(initial: NotificationSettings) -> Element {
    let mut toasts = use_toasts();
    let mut prefs = use_signal(|| initial.clone());
    let mut saving = use_signal(|| false);

    let handle_save = move |_: MouseEvent| {
        spawn(async move {
            saving.set(true);
            match api::update_notifications(prefs()).await {
                Ok(saved) => {
                    prefs.set(saved);
                    toast_success(&mut toasts, "Notification settings saved", None);
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
            saving.set(false);
        });
    };

    let current = prefs();

    rsx! {
        Card { class: "settings-card",
            h2 { class: "view-section-title", "Notifications" }
            Checkbox {
                id: "notify-email",
                checked: current.email_notifications,
                label: "Email notifications",
                description: "Receive a summary of account activity by email.",
                onchange: move |on| prefs.write().email_notifications = on,
            }
            Checkbox {
                id: "notify-low-stock",
                checked: current.low_stock_alerts,
                label: "Low stock alerts",
                description: "Get notified when a product runs low.",
                onchange: move |on| prefs.write().low_stock_alerts = on,
            }
            Checkbox {
                id: "notify-new-users",
                checked: current.new_user_registrations,
                label: "New user registrations",
                description: "Get notified when someone signs up.",
                onchange: move |on| prefs.write().new_user_registrations = on,
            }
            Checkbox {
                id: "notify-system",
                checked: current.system_updates,
                label: "System updates",
                description: "Maintenance windows and release notes.",
                onchange: move |on| prefs.write().system_updates = on,
            }
            div { class: "modal-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: handle_save,
                    if saving() { "Saving..." } else { "Save preferences" }
                }
            }
        }
    }
}

#[component]
fn AppearanceSection(initial: AppearanceSettings) -> Element {
    let mut toasts = use_toasts();
    let mut appearance = use_signal(|| initial);
    let mut saving = use_signal(|| false);

    let handle_save = move |_: MouseEvent| {
        spawn(async move {
            saving.set(true);
            match api::update_appearance(appearance()).await {
                Ok(saved) => {
                    appearance.set(saved);
                    apply_appearance(&saved);
                    toast_success(&mut toasts, "Appearance saved", None);
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card { class: "settings-card",
            h2 { class: "view-section-title", "Theme" }
            ThemeSelector {
                value: appearance().theme,
                on_change: move |theme| appearance.write().theme = theme,
            }

            h2 { class: "view-section-title mt-6", "Density" }
            Select {
                id: "appearance-density",
                value: "{appearance().density.as_str()}",
                onchange: move |evt: FormEvent| {
                    appearance.write().density = Density::parse(&evt.value()).unwrap_or_default();
                },
                for density in Density::ALL {
                    option { value: density.as_str(), "{density_label(density)}" }
                }
            }

            div { class: "modal-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: handle_save,
                    if saving() { "Saving..." } else { "Save appearance" }
                }
            }
        }
    }
}

fn density_label(density: Density) -> &'static str {
    match density {
        Density::Compact => "Compact",
        Density::Comfortable => "Comfortable",
        Density::Spacious => "Spacious",
    }
}

#[component]
fn ThemeSelector(value: Theme, on_change: EventHandler<Theme>) -> Element {
    let radio_class = |active: bool| {
        if active {
            "theme-card theme-card-active"
        } else {
            "theme-card"
        }
    };

    rsx! {
        div {
            class: "flex flex-wrap gap-3",
            label {
                class: radio_class(value == Theme::System),
                onclick: move |_| on_change.call(Theme::System),
                Icon { icon: FaCircleHalfStroke, width: 14, height: 14 }
                span { "System" }
            }
            label {
                class: radio_class(value == Theme::Light),
                onclick: move |_| on_change.call(Theme::Light),
                Icon { icon: FaSun, width: 14, height: 14 }
                span { "Light" }
            }
            label {
                class: radio_class(value == Theme::Dark),
                onclick: move |_| on_change.call(Theme::Dark),
                Icon { icon: FaMoon, width: 14, height: 14 }
                span { "Dark" }
            }
        }
        p {
            class: "view-muted mt-2",
            "System follows your OS preference."
        }
    }
}
