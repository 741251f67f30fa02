use dioxus::prelude::*;
use model::format::{format_date, format_file_size, FileKind};
use model::query::filter_files;
use model::FileItem;
use serde::Deserialize;

use super::{ConfirmDialog, ModalOverlay};
use crate::components::{Button, ButtonVariant, Card, EmptyState, Input, Label, Spinner};
use crate::icons::{FaDownload, FaEye, FaFile, FaFilePdf, FaImage, FaTrash, FaUpload};
use crate::{toast_error, toast_success, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");
const UPLOAD_INPUT_ID: &str = "file-upload-input";

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Closed,
    Upload,
    Delete(FileItem),
}

/// What the upload script reports back after posting the form.
#[derive(Debug, Clone, Deserialize)]
struct UploadOutcome {
    selected: bool,
    #[serde(default)]
    file: Option<FileItem>,
    #[serde(default)]
    error: Option<String>,
}

impl UploadOutcome {
    fn into_result(self) -> Result<FileItem, String> {
        if !self.selected {
            return Err("Please select a file to upload".to_string());
        }
        match (self.file, self.error) {
            (_, Some(message)) => Err(message),
            (Some(file), None) => Ok(file),
            (None, None) => Err("Failed to upload file".to_string()),
        }
    }
}

/// Posts the first file of the `<input type="file">` with `input_id` as
/// multipart form data to the upload route. The bytes never pass through wasm.
async fn post_selected_file(input_id: &str) -> Result<FileItem, String> {
    let route = api::files::UPLOAD_ROUTE;
    let js = format!(
        r#"
        const input = document.getElementById("{input_id}");
        const file = input && input.files && input.files[0];
        if (!file) {{
            dioxus.send({{ selected: false }});
        }} else {{
            const form = new FormData();
            form.append("file", file, file.name);
            try {{
                const res = await fetch("{route}", {{
                    method: "POST",
                    body: form,
                    credentials: "same-origin",
                }});
                const body = await res.json().catch(() => null);
                if (res.ok && body) {{
                    dioxus.send({{ selected: true, file: body }});
                }} else {{
                    dioxus.send({{
                        selected: true,
                        error: (body && body.message) || "Failed to upload file",
                    }});
                }}
            }} catch (e) {{
                dioxus.send({{ selected: true, error: "Failed to upload file" }});
            }}
        }}
        "#
    );
    let mut eval = document::eval(&js);
    match eval.recv::<UploadOutcome>().await {
        Ok(outcome) => outcome.into_result(),
        Err(e) => {
            tracing::warn!("upload script failed: {e}");
            Err("Failed to upload file".to_string())
        }
    }
}

/// Uploaded files with search, upload, download/preview and delete.
#[component]
pub fn FilesView() -> Element {
    let mut toasts = use_toasts();
    let mut search = use_signal(String::new);
    let mut dialog = use_signal(|| Dialog::Closed);

    let mut files = use_resource(move || async move {
        api::list_files().await.map_err(|e| {
            toast_error(&mut toasts, "Error", &e.to_string());
            e.to_string()
        })
    });

    let all: Vec<FileItem> = match &*files.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let visible = filter_files(&all, &search());
    let empty_message = if search().trim().is_empty() {
        "No files uploaded yet."
    } else {
        "No files match your search."
    };

    let handle_delete = move |id: String| {
        spawn(async move {
            match api::delete_file(id).await {
                Ok(reply) => {
                    toast_success(&mut toasts, "Success", Some(&reply.message));
                    files.restart();
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
                h1 { class: "view-title", "Files" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| dialog.set(Dialog::Upload),
                    Icon { icon: FaUpload, width: 14, height: 14 }
                    span { "Upload file" }
                }
            }

            div { class: "toolbar",
                Input {
                    class: "toolbar-search",
                    placeholder: "Search files...",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
            }

            if files.read().is_none() {
                Spinner { label: "Loading files..." }
            } else if visible.is_empty() {
                EmptyState { message: "{empty_message}" }
            } else {
                Card { class: "table-card",
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Size" }
                                th { "Uploaded" }
                                th { class: "text-right", "Actions" }
                            }
                        }
                        tbody {
                            for file in visible {
                                FileRow {
                                    key: "{file.id}",
                                    file: file.clone(),
                                    on_delete: move |f| dialog.set(Dialog::Delete(f)),
                                }
                            }
                        }
                    }
                }
            }
        }

        match dialog() {
            Dialog::Closed => rsx! {},
            Dialog::Upload => rsx! {
                UploadDialog {
                    on_uploaded: move |_| {
                        dialog.set(Dialog::Closed);
                        files.restart();
                    },
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
            Dialog::Delete(file) => rsx! {
                ConfirmDialog {
                    title: "Delete file",
                    message: format!("Are you sure you want to delete \"{}\"?", file.filename),
                    on_confirm: move |_| handle_delete(file.id.clone()),
                    on_cancel: move |_| dialog.set(Dialog::Closed),
                }
            },
        }
    }
}

#[component]
fn FileRow(file: FileItem, on_delete: EventHandler<FileItem>) -> Element {
    let kind = FileKind::classify(file.content_type.as_deref());
    let size = format_file_size(file.size);
    let uploaded = format_date(file.uploaded_at.as_deref());
    let download = api::files::download_url(&file.id);
    let preview = api::files::preview_url(&file.id);
    let target = file.clone();

    rsx! {
        tr {
            td {
                div { class: "file-cell",
                    match kind {
                        FileKind::Image => rsx! { Icon { icon: FaImage, width: 16, height: 16 } },
                        FileKind::Document => rsx! { Icon { icon: FaFilePdf, width: 16, height: 16 } },
                        FileKind::Other => rsx! { Icon { icon: FaFile, width: 16, height: 16 } },
                    }
                    span { "{file.filename}" }
                }
            }
            td { "{size}" }
            td { "{uploaded}" }
            td { class: "text-right",
                if kind.is_previewable() {
                    a {
                        class: "btn btn-ghost",
                        href: "{preview}",
                        target: "_blank",
                        rel: "noopener",
                        title: "Preview",
                        Icon { icon: FaEye, width: 14, height: 14 }
                    }
                }
                a { class: "btn btn-ghost", href: "{download}", title: "Download",
                    Icon { icon: FaDownload, width: 14, height: 14 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    onclick: move |_| on_delete.call(target.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn UploadDialog(on_uploaded: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let mut toasts = use_toasts();
    let mut uploading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_upload = move |_: MouseEvent| {
        spawn(async move {
            uploading.set(true);
            error.set(None);
            match post_selected_file(UPLOAD_INPUT_ID).await {
                Ok(file) => {
                    toast_success(&mut toasts, "File uploaded", Some(&file.filename));
                    on_uploaded.call(());
                }
                Err(message) => error.set(Some(message)),
            }
            uploading.set(false);
        });
    };

    rsx! {
        ModalOverlay { title: "Upload file", on_close: move |_| on_cancel.call(()),
            div { class: "mb-4",
                Label { html_for: "{UPLOAD_INPUT_ID}", "File" }
                input { id: UPLOAD_INPUT_ID, class: "form-input", r#type: "file" }
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
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: uploading(),
                    onclick: handle_upload,
                    if uploading() { "Uploading..." } else { "Upload" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(json: &str) -> Result<FileItem, String> {
        serde_json::from_str::<UploadOutcome>(json)
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_uploaded_file_is_returned() {
        let file = outcome(
            r#"{"selected":true,"file":{"id":"f1","filename":"report.pdf","size":3145728,"type":"application/pdf"}}"#,
        )
        .unwrap();
        assert_eq!(file.id, "f1");
        assert_eq!(file.filename, "report.pdf");
        assert_eq!(file.size, Some(3_145_728));
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(
            outcome(r#"{"selected":false}"#).unwrap_err(),
            "Please select a file to upload"
        );
    }

    #[test]
    fn test_server_message_is_shown() {
        assert_eq!(
            outcome(r#"{"selected":true,"error":"Your session has expired. Please log in again."}"#)
                .unwrap_err(),
            "Your session has expired. Please log in again."
        );
        assert_eq!(
            outcome(r#"{"selected":true}"#).unwrap_err(),
            "Failed to upload file"
        );
    }
}
