use dioxus::prelude::*;
use model::format::format_price;
use model::forms::{ProductForm, StockForm};
use model::query::{categories, paginate, total_pages, Pager, ProductQuery, ProductSort};
use model::{InventoryInput, Product, ProductInput};

use super::{ConfirmDialog, ModalOverlay};
use crate::components::{
    Badge, Button, ButtonVariant, Card, EmptyState, Input, Label, Pagination, Select, Spinner,
    Textarea,
};
use crate::icons::{
    FaArrowDownWideShort, FaArrowUpWideShort, FaBoxesStacked, FaPenToSquare, FaPlus, FaTrash,
    FaTriangleExclamation,
};
use crate::{toast_error, toast_success, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Closed,
    Add,
    Edit(Product),
    Stock(Product),
    Delete(Product),
}

/// Product catalogue: search, category filter, sorting, client-side paging
/// and the add/edit/stock/delete dialogs.
#[component]
pub fn ProductsView() -> Element {
    let mut toasts = use_toasts();
    let mut query = use_signal(ProductQuery::default);
    let mut pager = use_signal(Pager::default);
    let mut dialog = use_signal(|| Dialog::Closed);

    let ui_config = use_resource(|| async { api::get_ui_config().await.unwrap_or_default() });
    use_effect(move || {
        if let Some(config) = ui_config() {
            pager.set(Pager::new(config.page_size));
        }
    });
    let threshold = ui_config()
        .map(|c| c.low_stock_threshold)
        .unwrap_or(model::query::LOW_STOCK_THRESHOLD);

    let mut products = use_resource(move || async move {
        api::list_products().await.map_err(|e| {
            toast_error(&mut toasts, "Error", &e.to_string());
            e.to_string()
        })
    });

    let all: Vec<Product> = match &*products.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let category_options = categories(&all);
    let filtered = query().apply(&all);
    let mut page = pager();
    page.update_total(total_pages(filtered.len(), page.size));
    let visible = paginate(&filtered, page.page, page.size).to_vec();

    let handle_create = move |input: ProductInput| {
        spawn(async move {
            match api::create_product(input).await {
                Ok(product) => {
                    toast_success(&mut toasts, "Product created", Some(&product.name));
                    dialog.set(Dialog::Closed);
                    products.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
        });
    };

    let handle_update = move |(id, input): (String, ProductInput)| {
        spawn(async move {
            match api::update_product(id, input).await {
                Ok(product) => {
                    toast_success(&mut toasts, "Product updated", Some(&product.name));
                    dialog.set(Dialog::Closed);
                    products.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
        });
    };

    let handle_stock = move |(id, input): (String, InventoryInput)| {
        spawn(async move {
            match api::update_inventory(id, input.quantity, input.location).await {
                Ok(_) => {
                    toast_success(&mut toasts, "Stock updated", None);
                    dialog.set(Dialog::Closed);
                    products.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
        });
    };

    let handle_delete = move |id: String| {
        spawn(async move {
            match api::delete_product(id).await {
                Ok(reply) => {
                    toast_success(&mut toasts, "Success", Some(&reply.message));
                    products.restart();
                }
                Err(e) => toast_error(&mut toasts, "Error", &e.to_string()),
            }
            dialog.set(Dialog::Closed);
        });
    };

    let q = query();
    let direction = if q.descending { "Descending" } else { "Ascending" };
    let empty_message = if q.is_filtered() {
        "No products match your search criteria."
    } else {
        "No products yet. Add your first product to get started."
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div { class: "view-page",
            div { class: "view-header",
                h1 { class: "view-title", "Products" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| dialog.set(Dialog::Add),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Add product" }
                }
            }

            div { class: "toolbar",
                Input {
                    class: "toolbar-search",
                    placeholder: "Search products...",
                    value: q.search.clone(),
                    oninput: move |evt: FormEvent| {
                        query.write().search = evt.value();
                        pager.write().reset();
                    },
                }
                Select {
                    value: q.category.clone().unwrap_or_default(),
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        query.write().category = (!value.is_empty()).then_some(value);
                        pager.write().reset();
                    },
                    option { value: "", "All categories" }
                    for category in category_options {
                        option { key: "{category}", value: "{category}", "{category}" }
                    }
                }
                Select {
                    value: "{q.sort.as_str()}",
                    onchange: move |evt: FormEvent| {
                        query.write().sort = ProductSort::parse(&evt.value()).unwrap_or_default();
                    },
                    for sort in ProductSort::ALL {
                        option { value: sort.as_str(), "Sort by {sort.label()}" }
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    title: "{direction}",
                    onclick: move |_| {
                        let descending = query().descending;
                        query.write().descending = !descending;
                    },
                    if q.descending {
                        Icon { icon: FaArrowDownWideShort, width: 14, height: 14 }
                    } else {
                        Icon { icon: FaArrowUpWideShort, width: 14, height: 14 }
                    }
                }
            }

            if products.read().is_none() {
                Spinner { label: "Loading products..." }
            } else if visible.is_empty() {
                EmptyState { message: "{empty_message}" }
            } else {
                div { class: "product-grid",
                    for product in visible {
                        ProductCard {
                            key: "{product.id}",
                            product: product.clone(),
                            threshold,
                            on_edit: move |p| dialog.set(Dialog::Edit(p)),
                            on_stock: move |p| dialog.set(Dialog::Stock(p)),
                            on_delete: move |p| dialog.set(Dialog::Delete(p)),
                        }
                    }
                }
                Pagination { pager: page, on_change: move |p| pager.set(p) }
            }
        }

        match dialog() {
            Dialog::Closed => rsx! {},
            Dialog::Add => rsx! {
                ProductDialog {
                    title: "Add product",
                    submit_label: "Create",
                    initial: ProductForm::default(),
                    on_submit: handle_create,
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
            Dialog::Edit(product) => rsx! {
                ProductDialog {
                    title: "Edit product",
                    submit_label: "Save changes",
                    initial: ProductForm::from(&product),
                    on_submit: move |input| handle_update((product.id.clone(), input)),
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
            Dialog::Stock(product) => rsx! {
                StockDialog {
                    product: product.clone(),
                    on_submit: handle_stock,
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
            Dialog::Delete(product) => rsx! {
                ConfirmDialog {
                    title: "Delete product",
                    message: format!("Are you sure you want to delete \"{}\"? This cannot be undone.", product.name),
                    on_confirm: move |_| handle_delete(product.id.clone()),
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
        }
    }
}

#[component]
fn ProductCard(
    product: Product,
    threshold: i32,
    on_edit: EventHandler<Product>,
    on_stock: EventHandler<Product>,
    on_delete: EventHandler<Product>,
) -> Element {
    let low = product.is_low_stock(threshold);
    let edit = product.clone();
    let stock = product.clone();
    let delete = product.clone();

    rsx! {
        Card { class: "product-card",
            div { class: "product-card-header",
                h3 { class: "product-name", "{product.name}" }
                if !product.category.is_empty() {
                    Badge { "{product.category}" }
                }
            }
            if !product.description.is_empty() {
                p { class: "view-muted", "{product.description}" }
            }
            div { class: "product-meta",
                span { class: "product-price", "{format_price(product.price)}" }
                span { class: if low { "product-stock low" } else { "product-stock" },
                    if low {
                        Icon { icon: FaTriangleExclamation, width: 12, height: 12 }
                    }
                    " {product.quantity} in stock"
                }
            }
            if let Some(location) = product.location() {
                p { class: "view-muted", "Location: {location}" }
            }
            if low {
                p { class: "product-warning", "Low stock: reorder soon" }
            }
            div { class: "product-actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit.clone()),
                    Icon { icon: FaPenToSquare, width: 14, height: 14 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Update stock",
                    onclick: move |_| on_stock.call(stock.clone()),
                    Icon { icon: FaBoxesStacked, width: 14, height: 14 }
                }
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

#[component]
fn ProductDialog(
    title: String,
    submit_label: String,
    initial: ProductForm,
    on_submit: EventHandler<ProductInput>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match form().validate() {
            Ok(input) => {
                error.set(None);
                on_submit.call(input);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        ModalOverlay { title, on_close: move |_| on_cancel.call(()),
            form { onsubmit: handle_submit,
                div { class: "mb-4",
                    Label { html_for: "product-name", "Name" }
                    Input {
                        id: "product-name",
                        value: form().name,
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }
                }
                div { class: "mb-4",
                    Label { html_for: "product-description", "Description" }
                    Textarea {
                        id: "product-description",
                        value: form().description,
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                }
                div { class: "form-grid",
                    div {
                        Label { html_for: "product-price", "Price" }
                        Input {
                            id: "product-price",
                            r#type: "number",
                            min: "0",
                            step: "0.01",
                            value: form().price,
                            oninput: move |evt: FormEvent| form.write().price = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "product-quantity", "Quantity" }
                        Input {
                            id: "product-quantity",
                            r#type: "number",
                            min: "0",
                            step: "1",
                            value: form().quantity,
                            oninput: move |evt: FormEvent| form.write().quantity = evt.value(),
                        }
                    }
                }
                div { class: "form-grid",
                    div {
                        Label { html_for: "product-category", "Category" }
                        Input {
                            id: "product-category",
                            value: form().category,
                            oninput: move |evt: FormEvent| form.write().category = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "product-location", "Location" }
                        Input {
                            id: "product-location",
                            placeholder: "e.g. Warehouse A",
                            value: form().location,
                            oninput: move |evt: FormEvent| form.write().location = evt.value(),
                        }
                    }
                }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button { variant: ButtonVariant::Primary, r#type: "submit", "{submit_label}" }
                }
            }
        }
    }
}

#[component]
fn StockDialog(
    product: Product,
    on_submit: EventHandler<(String, InventoryInput)>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| StockForm::from(&product));
    let mut error = use_signal(|| Option::<String>::None);
    let id = product.id.clone();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match form().validate() {
            Ok(input) => {
                error.set(None);
                on_submit.call((id.clone(), input));
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        ModalOverlay {
            title: format!("Update stock: {}", product.name),
            on_close: move |_| on_cancel.call(()),
            form { onsubmit: handle_submit,
                div { class: "form-grid",
                    div {
                        Label { html_for: "stock-quantity", "Quantity" }
                        Input {
                            id: "stock-quantity",
                            r#type: "number",
                            min: "0",
                            step: "1",
                            value: form().quantity,
                            oninput: move |evt: FormEvent| form.write().quantity = evt.value(),
                        }
                    }
                    div {
                        Label { html_for: "stock-location", "Location" }
                        Input {
                            id: "stock-location",
                            value: form().location,
                            oninput: move |evt: FormEvent| form.write().location = evt.value(),
                        }
                    }
                }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button { variant: ButtonVariant::Primary, r#type: "submit", "Update" }
                }
            }
        }
    }
}
