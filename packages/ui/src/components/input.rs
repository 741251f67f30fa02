use dioxus::prelude::*;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "form-label", r#for: "{html_for}", {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] disabled: bool,
    #[props(default)] required: bool,
    #[props(default)] min: String,
    #[props(default)] step: String,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "form-input {class}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            required,
            min: if !min.is_empty() { "{min}" },
            step: if !step.is_empty() { "{step}" },
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "form-input {class}",
            placeholder: "{placeholder}",
            rows: "{rows}",
            value: "{value}",
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

/// A native `<select>`; pass `option` elements as children.
#[component]
pub fn Select(
    #[props(default)] id: String,
    #[props(default)] class: String,
    value: String,
    onchange: EventHandler<FormEvent>,
    children: Element,
) -> Element {
    rsx! {
        select {
            id: "{id}",
            class: "form-select {class}",
            value: "{value}",
            onchange: move |evt| onchange.call(evt),
            {children}
        }
    }
}

#[component]
pub fn Checkbox(
    id: String,
    checked: bool,
    label: String,
    #[props(default)] description: String,
    onchange: EventHandler<bool>,
) -> Element {
    rsx! {
        div { class: "form-check",
            div {
                label { class: "form-label", r#for: "{id}", "{label}" }
                if !description.is_empty() {
                    p { class: "view-muted", "{description}" }
                }
            }
            input {
                id: "{id}",
                r#type: "checkbox",
                class: "form-switch",
                checked,
                onchange: move |evt: FormEvent| onchange.call(evt.checked()),
            }
        }
    }
}
