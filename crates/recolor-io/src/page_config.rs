//! Page-embedded configuration.
//!
//! A page may override [`ClientConfig`] defaults with a JSON block:
//!
//! ```html
//! <script type="application/json" id="recolor-config">
//!   { "endpoint": "/api/colorize" }
//! </script>
//! ```

use recolor_core::ClientConfig;

/// Id of the element holding the JSON override.
pub const CONFIG_ELEMENT_ID: &str = "recolor-config";

/// Read the page's config block, falling back to defaults.
///
/// A missing block is normal; an invalid one is logged as a warning.
#[must_use]
pub fn read_page_config() -> ClientConfig {
    let Some(text) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        return ClientConfig::default();
    };

    ClientConfig::from_json(&text).unwrap_or_else(|e| {
        web_sys::console::warn_1(
            &format!("ignoring invalid #{CONFIG_ELEMENT_ID} block: {e}").into(),
        );
        ClientConfig::default()
    })
}
