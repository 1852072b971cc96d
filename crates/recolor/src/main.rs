use dioxus::prelude::*;
use recolor_core::{SelectedFile, SubmitPolicy, UploadWorkflow};
use recolor_io::{ComparisonPanel, DownloadButton, UploadForm, session};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Holds the [`UploadWorkflow`] in a signal and wires the upload form,
/// comparison panel, and download button to it.
fn app() -> Element {
    let workflow = use_signal(|| UploadWorkflow::new(recolor_io::read_page_config()));

    // --- File selection handler ---
    // Runs as its own task so the label updates before the decode.
    let on_select = move |file: Option<SelectedFile>| {
        spawn(session::select_file(workflow, file));
    };

    // --- Submit handler ---
    let on_submit = move |()| {
        spawn(session::submit(workflow));
    };

    // --- Download handler ---
    let on_download = move |()| {
        session::download(workflow);
    };

    let state = workflow.read();
    let config = state.config();
    let allow_resubmit = config.submit_policy == SubmitPolicy::AllowConcurrent;

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "page",
            header {
                h1 { "recolor" }
                p { class: "subtitle", "Bring color to grayscale photos" }
            }

            UploadForm {
                label: state.label().to_owned(),
                accepted_extensions: config.accepted_extensions.clone(),
                submitting: state.is_submitting(),
                allow_resubmit: allow_resubmit,
                on_select: on_select,
                on_submit: on_submit,
            }

            ComparisonPanel { display: state.display().clone() }

            DownloadButton {
                visible: state.display().download_visible,
                on_download: on_download,
            }
        }
    }
}
