use dioxus::prelude::*;
use model::query::Pager;

use super::{Button, ButtonVariant};
use crate::icons::{FaChevronLeft, FaChevronRight};
use crate::Icon;

/// Previous/next controls with a "Page X of Y" label. Hidden for a single page.
#[component]
pub fn Pagination(pager: Pager, on_change: EventHandler<Pager>) -> Element {
    if pager.total_pages <= 1 {
        return rsx! {};
    }

    rsx! {
        div { class: "pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: !pager.has_prev(),
                onclick: move |_| {
                    let mut next = pager;
                    if next.prev() {
                        on_change.call(next);
                    }
                },
                Icon { icon: FaChevronLeft, width: 12, height: 12 }
                span { "Previous" }
            }
            span { class: "view-muted", "{pager.label()}" }
            Button {
                variant: ButtonVariant::Outline,
                disabled: !pager.has_next(),
                onclick: move |_| {
                    let mut next = pager;
                    if next.next() {
                        on_change.call(next);
                    }
                },
                span { "Next" }
                Icon { icon: FaChevronRight, width: 12, height: 12 }
            }
        }
    }
}
