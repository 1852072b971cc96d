//! Download button for the current result.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;

/// Props for the [`DownloadButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DownloadButtonProps {
    /// Whether the button is rendered at all.
    visible: bool,
    /// Called when the user clicks the button.
    on_download: EventHandler<()>,
}

/// Saves the image in the result slot as a PNG.
#[component]
pub fn DownloadButton(props: DownloadButtonProps) -> Element {
    if !props.visible {
        return rsx! {};
    }

    rsx! {
        button {
            id: "btn_download",
            r#type: "button",
            class: "btn btn-secondary",
            onclick: move |_| props.on_download.call(()),
            Icon { width: 16, height: 16, icon: LdDownload }
            span { "Download" }
        }
    }
}
