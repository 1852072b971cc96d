//! User-facing alerts and console diagnostics.
//!
//! Every completed step surfaces as a blocking `window.alert`; the
//! detail behind it goes to the browser console.

use recolor_core::Notice;
use wasm_bindgen::JsValue;

/// Show `notice` to the user and log its detail.
pub fn show_notice(notice: &Notice) {
    match notice {
        Notice::Success {
            server_message: Some(message),
            ..
        } => web_sys::console::log_1(&JsValue::from_str(message)),
        Notice::Success { .. } => {}
        Notice::Error { cause, .. } => {
            web_sys::console::error_1(&format!("upload failed: {cause}").into());
        }
    }
    alert(notice.alert());
}

/// Show a blocking alert. Silently does nothing outside a window.
pub fn alert(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let _ = window.alert_with_message(text);
}
