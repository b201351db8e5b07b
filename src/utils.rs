pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route a diagnostic line to wherever the host can see it: the JS console
/// when running under wasm, stderr otherwise (so `cargo test` output shows
/// it too).
#[cfg(target_arch = "wasm32")]
pub fn emit_diagnostic(message: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn emit_diagnostic(message: &str) {
    eprintln!("{}", message);
}

/// `format!`-style diagnostic reporting, routed through `emit_diagnostic`.
#[macro_export]
macro_rules! diagnostic {
    ($($arg:tt)*) => {
        $crate::utils::emit_diagnostic(&format!($($arg)*))
    };
}
