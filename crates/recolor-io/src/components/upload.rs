//! Upload form with file picker, drop zone, and submit button.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdImageUp, LdSend};
use recolor_core::SelectedFile;
use recolor_core::config::accept_attribute;

/// Check whether a filename has one of the allowed extensions.
///
/// An empty allow-list accepts every file.
fn has_allowed_extension(name: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        allowed
            .iter()
            .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
    })
}

/// Props for the [`UploadForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadFormProps {
    /// Text of the file label (`"No file selected"` or the file name).
    label: String,
    /// Extensions offered by the picker, without dots.
    accepted_extensions: Vec<String>,
    /// Whether a submission is awaiting its reply.
    submitting: bool,
    /// Whether another submission may start while one is pending.
    allow_resubmit: bool,
    /// Called with the picked file, or `None` when the selection was cleared.
    on_select: EventHandler<Option<SelectedFile>>,
    /// Called when the form is submitted.
    on_submit: EventHandler<()>,
}

/// The upload form.
///
/// A picker button and drop zone feed the first chosen file to
/// `on_select`; the submit button fires `on_submit`.
#[component]
pub fn UploadForm(props: UploadFormProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let allowed = props.accepted_extensions.clone();
    let accept = accept_attribute(&allowed);

    // Shared by the picker and drop paths so validation and reading
    // live in one place.
    let process_files = move |files: Vec<FileData>| {
        let allowed = allowed.clone();
        async move {
            let Some(file) = files.first() else {
                error.set(None);
                props.on_select.call(None);
                return;
            };
            let name = file.name();
            if !has_allowed_extension(&name, &allowed) {
                error.set(Some(format!("Unsupported file type: {name}")));
                return;
            }
            // The picker's MIME type wins; the extension is only a fallback.
            let mime_type = file.content_type();
            match file.read_bytes().await {
                Ok(bytes) => {
                    error.set(None);
                    props
                        .on_select
                        .call(Some(SelectedFile::new(name, bytes.to_vec(), mime_type)));
                }
                Err(e) => {
                    error.set(Some(format!("Failed to read file: {e}")));
                }
            }
        }
    };

    let handle_files = {
        let process_files = process_files.clone();
        move |evt: FormEvent| {
            let process_files = process_files.clone();
            async move {
                process_files(evt.files()).await;
            }
        }
    };

    let handle_drop = move |evt: DragEvent| {
        let process_files = process_files.clone();
        async move {
            evt.prevent_default();
            dragging.set(false);
            process_files(evt.files()).await;
        }
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        props.on_submit.call(());
    };

    let zone_class = if dragging() {
        "drop-zone drop-zone-active"
    } else {
        "drop-zone"
    };

    rsx! {
        form { id: "form_file", class: "upload-form", onsubmit: handle_submit,
            div {
                class: "{zone_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: handle_drop,

                label { id: "btn_get_image_file", class: "btn btn-primary",
                    input {
                        id: "gray_image_file",
                        r#type: "file",
                        accept: "{accept}",
                        class: "hidden",
                        onchange: handle_files,
                    }
                    Icon { width: 16, height: 16, icon: LdImageUp }
                    span { "Choose image" }
                }

                p { id: "fileName", class: "file-label", "{props.label}" }

                if let Some(ref err) = error() {
                    p { class: "error-text", "{err}" }
                }
            }

            button {
                r#type: "submit",
                class: "btn btn-primary",
                disabled: props.submitting && !props.allow_resubmit,
                Icon { width: 16, height: 16, icon: LdSend }
                span { if props.submitting { "Colorizing..." } else { "Colorize" } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn allowed_extension_is_case_insensitive() {
        let allowed = exts(&["png", "jpg"]);
        assert!(has_allowed_extension("photo.PNG", &allowed));
        assert!(has_allowed_extension("scan.jpg", &allowed));
        assert!(!has_allowed_extension("notes.txt", &allowed));
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(!has_allowed_extension("README", &exts(&["png"])));
    }

    #[test]
    fn dotted_entries_are_accepted() {
        assert!(has_allowed_extension("a.webp", &exts(&[".webp"])));
    }

    #[test]
    fn empty_allow_list_accepts_everything() {
        assert!(has_allowed_extension("anything.bin", &[]));
        assert!(has_allowed_extension("README", &[]));
    }
}
