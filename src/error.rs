use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced to the host. Stack faults indicate a malformed program and
/// leave the machine in the state it reached when the fault was detected; the
/// host decides whether to stop or reset. Unknown opcodes are deliberately
/// *not* errors: they are reported as a diagnostic and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("stack overflow: CALL at maximum nesting depth")]
    StackOverflow,

    #[error("stack underflow: RET with an empty call stack")]
    StackUnderflow,
}

// Lets wasm-bindgen exported methods return Result<_, Chip8Error> directly;
// the JS side receives the Display message as an exception string.
impl From<Chip8Error> for JsValue {
    fn from(err: Chip8Error) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
