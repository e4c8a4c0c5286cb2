//! Keyboard edge source over an in-memory reader.
#![allow(clippy::expect_used)]

use inkframe::KeyboardInput;
use platform::{Button, InputDevice, InputEvent};

#[tokio::test]
async fn test_lines_become_presses_until_eof() {
    let typed: &[u8] = b"a\nhello\np\n \nR\n";
    let mut keyboard = KeyboardInput::new(typed);

    let mut presses = Vec::new();
    while let Some(InputEvent::ButtonPress(button)) = keyboard.wait_for_event().await {
        presses.push(button);
    }
    assert_eq!(presses, [Button::A, Button::B, Button::D, Button::C]);
    assert_eq!(keyboard.wait_for_event().await, None);
}
