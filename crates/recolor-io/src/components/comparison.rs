//! Side-by-side view of the original and the result.

use dioxus::prelude::*;
use recolor_core::DisplayState;

/// Props for the [`ComparisonPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ComparisonPanelProps {
    /// What to show. Nothing is rendered while `panel_visible` is false.
    display: DisplayState,
}

/// Shows the original image next to the placeholder or colorized result.
#[component]
pub fn ComparisonPanel(props: ComparisonPanelProps) -> Element {
    if !props.display.panel_visible {
        return rsx! {};
    }

    let original = props.display.original_url.clone();
    let result = props.display.result_url().unwrap_or_default();
    let result_caption = match props.display.result {
        Some(ref slot) if slot.is_colorized() => "Colorized",
        _ => "Processing...",
    };

    rsx! {
        div { id: "div_comparison_images", class: "comparison",
            figure { class: "comparison-item",
                // Absent when the selected file could not be previewed.
                if let Some(original) = original {
                    img { id: "original_image", src: "{original}", alt: "Original image" }
                }
                figcaption { "Original" }
            }
            figure { class: "comparison-item",
                img { id: "result_image", src: "{result}", alt: "Colorized image" }
                figcaption { "{result_caption}" }
            }
        }
    }
}
