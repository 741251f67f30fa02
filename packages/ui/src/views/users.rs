use dioxus::prelude::*;
use model::format::status_badge_class;
use model::forms::{NewUserForm, UserEditForm};
use model::query::{Pager, UserQuery, UserSortColumn};
use model::{Gender, Page, RoleType, User, UserStatus};

use super::{ConfirmDialog, ModalOverlay};
use crate::components::{
    Badge, Button, ButtonVariant, Card, EmptyState, Input, Label, Pagination, Select, Spinner,
};
use crate::icons::{FaPenToSquare, FaTrash, FaUserPlus};
use crate::{toast_error, toast_success, use_auth, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Closed,
    Add,
    Edit(User),
    Delete(User),
}

/// User administration. Pages come from the backend already sorted; search
/// and the status filter narrow the page that is shown.
#[component]
pub fn UsersView() -> Element {
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut query = use_signal(UserQuery::default);
    let mut column = use_signal(UserSortColumn::default);
    let mut pager = use_signal(Pager::default);
    let mut dialog = use_signal(|| Dialog::Closed);

    let mut users = use_resource(move || async move {
        let cursor = pager();
        let sort = column();
        api::list_users_page(sort.as_str().to_string(), cursor.size, cursor.page)
            .await
            .map_err(|e| {
                toast_error(&mut toasts, "Error", &e.to_string());
                e.to_string()
            })
    });

    let page: Page<User> = match &*users.read() {
        Some(Ok(page)) => page.clone(),
        _ => Page::empty(),
    };
    let mut cursor = pager();
    cursor.total_pages = page.total_pages;
    let can_delete = auth().has_role(RoleType::Admin.as_str());
    let q = query();
    let visible = q.apply(&page.content);
    let empty_message = if q.is_filtered() {
        "No users match your search criteria."
    } else {
        "No users found."
    };

    let handle_create = move |form: NewUserForm| {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                toast_error(&mut toasts, "Error", &e.to_string());
                return;
            }
        };
        spawn(async move {
            match api::sign_up(request).await {
                Ok(reply) => {
                    toast_success(&mut toasts, "User created", Some(&reply.message));
                    dialog.set(Dialog::Closed);
                    users.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
        });
    };

    let handle_update = move |form: UserEditForm| {
        let update = match form.validate() {
            Ok(update) => update,
            Err(e) => {
                toast_error(&mut toasts, "Error", &e.to_string());
                return;
            }
        };
        spawn(async move {
            match api::update_user(form.id.clone(), update).await {
                Ok(user) => {
                    toast_success(&mut toasts, "User updated", Some(&user.full_name()));
                    dialog.set(Dialog::Closed);
                    users.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
        });
    };

    let handle_delete = move |id: String| {
        spawn(async move {
            match api::delete_user(id).await {
                Ok(reply) => {
                    toast_success(&mut toasts, "Success", Some(&reply.message));
                    users.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
            dialog.set(Dialog::Closed);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div { class: "view-page",
            div { class: "view-header",
                h1 { class: "view-title", "Users" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| dialog.set(Dialog::Add),
                    Icon { icon: FaUserPlus, width: 14, height: 14 }
                    span { "Add user" }
                }
            }

            div { class: "toolbar",
                Input {
                    class: "toolbar-search",
                    placeholder: "Search users...",
                    value: q.search.clone(),
                    oninput: move |evt: FormEvent| query.write().search = evt.value(),
                }
                Select {
                    value: q.status.clone().unwrap_or_default(),
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        query.write().status = (!value.is_empty()).then_some(value);
                    },
                    option { value: "", "All statuses" }
                    for status in UserStatus::ALL {
                        option { value: status.as_str(), "{status.label()}" }
                    }
                }
                Select {
                    value: "{column().as_str()}",
                    onchange: move |evt: FormEvent| {
                        column.set(UserSortColumn::parse(&evt.value()).unwrap_or_default());
                        pager.write().reset();
                    },
                    for sort in UserSortColumn::ALL {
                        option { value: sort.as_str(), "Sort by {sort.label()}" }
                    }
                }
                Select {
                    value: "{cursor.size}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(size) = evt.value().parse::<u32>() {
                            pager.write().set_size(size);
                        }
                    },
                    for size in Pager::SIZES {
                        option { value: "{size}", "{size} per page" }
                    }
                }
            }

            if users.read().is_none() {
                Spinner { label: "Loading users..." }
            } else if visible.is_empty() {
                EmptyState { message: "{empty_message}" }
            } else {
                Card { class: "table-card",
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Mobile" }
                                th { "Roles" }
                                th { "Status" }
                                th { class: "text-right", "Actions" }
                            }
                        }
                        tbody {
                            for user in visible {
                                UserRow {
                                    key: "{user.id}",
                                    user: user.clone(),
                                    can_delete,
                                    on_edit: move |u| dialog.set(Dialog::Edit(u)),
                                    on_delete: move |u| dialog.set(Dialog::Delete(u)),
                                }
                            }
                        }
                    }
                }
                if page.total_elements > 0 {
                    p { class: "view-muted", "{page.total_elements} users in total" }
                }
            }
            Pagination { pager: cursor, on_change: move |p| pager.set(p) }
        }

        match dialog() {
            Dialog::Closed => rsx! {},
            Dialog::Add => rsx! {
                NewUserDialog {
                    on_submit: handle_create,
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
            Dialog::Edit(user) => rsx! {
                EditUserDialog {
                    initial: UserEditForm::from(&user),
                    on_submit: handle_update,
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
            Dialog::Delete(user) => rsx! {
                ConfirmDialog {
                    title: "Delete user",
                    message: format!("Are you sure you want to delete {}? This cannot be undone.", user.full_name()),
                    on_confirm: move |_| handle_delete(user.id.clone()),
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
        }
    }
}

#[component]
fn UserRow(
    user: User,
    /// Only administrators may delete accounts.
    can_delete: bool,
    on_edit: EventHandler<User>,
    on_delete: EventHandler<User>,
) -> Element {
    let badge = format!("{} status-badge", status_badge_class(&user.status));
    let edit = user.clone();
    let delete = user.clone();

    rsx! {
        tr {
            td {
                div { class: "user-cell",
                    span { class: "avatar", "{user.initials()}" }
                    span { "{user.full_name()}" }
                }
            }
            td { "{user.email}" }
            td { "{user.mobile}" }
            td {
                for role in user.role_names() {
                    Badge { key: "{role}", class: "role-badge", "{role}" }
                }
            }
            td {
                Badge { class: "{badge}", "{user.status}" }
            }
            td { class: "text-right",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit.clone()),
                    Icon { icon: FaPenToSquare, width: 14, height: 14 }
                }
                if can_delete {
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Delete",
                        onclick: move |_| on_delete.call(delete.clone()),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}

#[component]
fn NewUserDialog(on_submit: EventHandler<NewUserForm>, on_cancel: EventHandler<()>) -> Element {
    let mut form = use_signal(NewUserForm::default);

    rsx! {
        ModalOverlay { title: "Add user", on_close: move |_| on_cancel.call(()),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_submit.call(form());
                },
                div { class: "form-grid",
                    div {
                        Label { html_for: "new-user-first", "First name" }
                        Input {
                            id: "new-user-first",
                            value: form().first_name,
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "new-user-last", "Last name" }
                        Input {
                            id: "new-user-last",
                            value: form().last_name,
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "new-user-email", "Email" }
                    Input {
                        id: "new-user-email",
                        r#type: "email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "new-user-mobile", "Mobile" }
                    Input {
                        id: "new-user-mobile",
                        r#type: "tel",
                        value: form().mobile,
                        oninput: move |evt: FormEvent| form.write().mobile = evt.value(),
                    }
                }
                div { class: "form-grid",
                    div {
                        Label { html_for: "new-user-gender", "Gender" }
                        Select {
                            id: "new-user-gender",
                            value: form().gender,
                            onchange: move |evt: FormEvent| form.write().gender = evt.value(),
                            for gender in Gender::ALL {
                                option { value: gender.as_str(), "{gender.label()}" }
                            }
                        }
                    }
                    div {
                        Label { html_for: "new-user-status", "Status" }
                        Select {
                            id: "new-user-status",
                            value: form().status,
                            onchange: move |evt: FormEvent| form.write().status = evt.value(),
                            for status in UserStatus::ALL {
                                option { value: status.as_str(), "{status.label()}" }
                            }
                        }
                    }
                }
                div { class: "form-grid",
                    div {
                        Label { html_for: "new-user-role", "Role" }
                        Select {
                            id: "new-user-role",
                            value: form().role,
                            onchange: move |evt: FormEvent| form.write().role = evt.value(),
                            for role in RoleType::ALL {
                                option { value: role.as_str(), "{role.as_str()}" }
                            }
                        }
                    }
                    div {
                        Label { html_for: "new-user-password", "Password" }
                        Input {
                            id: "new-user-password",
                            r#type: "password",
                            value: form().password,
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }
                }

                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button { variant: ButtonVariant::Primary, r#type: "submit", "Create user" }
                }
            }
        }
    }
}

#[component]
fn EditUserDialog(
    initial: UserEditForm,
    on_submit: EventHandler<UserEditForm>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| initial.clone());

    rsx! {
        ModalOverlay { title: "Edit user", on_close: move |_| on_cancel.call(()),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_submit.call(form());
                },
                div { class: "form-grid",
                    div {
                        Label { html_for: "edit-user-first", "First name" }
                        Input {
                            id: "edit-user-first",
                            value: form().first_name,
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "edit-user-last", "Last name" }
                        Input {
                            id: "edit-user-last",
                            value: form().last_name,
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "edit-user-email", "Email" }
                    Input {
                        id: "edit-user-email",
                        r#type: "email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "edit-user-mobile", "Mobile" }
                    Input {
                        id: "edit-user-mobile",
                        r#type: "tel",
                        value: form().mobile,
                        oninput: move |evt: FormEvent| form.write().mobile = evt.value(),
                    }
                }
                div { class: "form-grid",
                    div {
                        Label { html_for: "edit-user-gender", "Gender" }
                        Select {
                            id: "edit-user-gender",
                            value: form().gender,
                            onchange: move |evt: FormEvent| form.write().gender = evt.value(),
                            for gender in Gender::ALL {
                                option { value: gender.as_str(), "{gender.label()}" }
                            }
                        }
                    }
                    div {
                        Label { html_for: "edit-user-status", "Status" }
                        Select {
                            id: "edit-user-status",
                            value: form().status,
                            onchange: move |evt: FormEvent| form.write().status = evt.value(),
                            for status in UserStatus::ALL {
                                option { value: status.as_str(), "{status.label()}" }
                            }
                        }
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "edit-user-role", "Role" }
                    Select {
                        id: "edit-user-role",
                        value: form().roles.first().cloned().unwrap_or_default(),
                        onchange: move |evt: FormEvent| form.write().roles = vec![evt.value()],
                        for role in RoleType::ALL {
                            option { value: role.as_str(), "{role.as_str()}" }
                        }
                    }
                }

                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button { variant: ButtonVariant::Primary, r#type: "submit", "Save changes" }
                }
            }
        }
    }
}
