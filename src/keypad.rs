use crate::NUM_KEYS;

/// 16 key-down flags plus a single-slot "last key-down event".
///
/// The host forwards its keyboard events through [`Keypad::key_down`] /
/// [`Keypad::key_up`]; keycodes are taken modulo 16. Each press overwrites
/// the pending event slot, so rapid presses between interpreter polls lose
/// all but the most recent one. The interpreter consumes the slot while
/// servicing `LD Vx, K`.
pub struct Keypad {
    keys_down: [bool; NUM_KEYS],
    keydown_event: Option<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys_down: [false; NUM_KEYS],
            keydown_event: None,
        }
    }

    pub fn key_down(&mut self, keycode: u8) {
        let key = keycode % NUM_KEYS as u8;
        self.keys_down[key as usize] = true;
        self.keydown_event = Some(key);
    }

    pub fn key_up(&mut self, keycode: u8) {
        self.keys_down[(keycode % NUM_KEYS as u8) as usize] = false;
    }

    pub fn is_key_down(&self, keycode: u8) -> bool {
        self.keys_down[(keycode % NUM_KEYS as u8) as usize]
    }

    pub fn has_keydown_event(&self) -> bool {
        self.keydown_event.is_some()
    }

    /// The most recent key-down event, if one is pending. Does not consume
    /// it; pair with [`Keypad::clear_keydown_event`].
    pub fn keydown_event(&self) -> Option<u8> {
        self.keydown_event
    }

    pub fn clear_keydown_event(&mut self) {
        self.keydown_event = None;
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_state_tracks_up_down() {
        let mut k = Keypad::new();
        assert!(!k.is_key_down(0xA));
        k.key_down(0xA);
        assert!(k.is_key_down(0xA));
        k.key_up(0xA);
        assert!(!k.is_key_down(0xA));
    }

    #[test]
    fn keycodes_wrap_modulo_16() {
        let mut k = Keypad::new();
        k.key_down(0x13);
        assert!(k.is_key_down(0x3));
        assert_eq!(k.keydown_event(), Some(0x3));
        k.key_up(0x13);
        assert!(!k.is_key_down(0x3));
    }

    #[test]
    fn event_slot_is_last_writer_wins() {
        let mut k = Keypad::new();
        k.key_down(0x1);
        k.key_down(0x2);
        assert_eq!(k.keydown_event(), Some(0x2));
    }

    #[test]
    fn event_slot_clears_explicitly() {
        let mut k = Keypad::new();
        k.key_down(0x5);
        assert!(k.has_keydown_event());
        k.clear_keydown_event();
        assert!(!k.has_keydown_event());
        assert_eq!(k.keydown_event(), None);
        // Clearing the event does not release the key.
        assert!(k.is_key_down(0x5));
    }

    #[test]
    fn key_up_leaves_event_pending() {
        let mut k = Keypad::new();
        k.key_down(0x7);
        k.key_up(0x7);
        assert_eq!(k.keydown_event(), Some(0x7));
    }
}
