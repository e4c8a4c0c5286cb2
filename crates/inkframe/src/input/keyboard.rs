//! Keyboard edge source: one button press per line on stdin.
//!
//! | Key                | Button | Default command |
//! |--------------------|--------|-----------------|
//! | `a`, `n`           | A      | advance         |
//! | `b`, `p`           | B      | retreat         |
//! | `c`, `r`           | C      | reset history   |
//! | `d`, space, `space`| D      | toggle pause    |

use platform::{Button, InputDevice, InputEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Map one input line to a button.
pub fn parse_key(line: &str) -> Option<Button> {
    if line.trim_end_matches(['\r', '\n']) == " " {
        return Some(Button::D);
    }
    match line.trim().to_ascii_lowercase().as_str() {
        "n" => Some(Button::A),
        "p" => Some(Button::B),
        "r" => Some(Button::C),
        "space" => Some(Button::D),
        other => Button::from_name(other),
    }
}

/// Reads button presses from any line-oriented async reader.
pub struct KeyboardInput<R> {
    lines: Lines<R>,
}

impl KeyboardInput<BufReader<Stdin>> {
    /// Read from the process's stdin.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> KeyboardInput<R> {
    /// Read lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: AsyncBufRead + Unpin> InputDevice for KeyboardInput<R> {
    async fn wait_for_event(&mut self) -> Option<InputEvent> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => match parse_key(&line) {
                    Some(button) => return Some(InputEvent::ButtonPress(button)),
                    None => tracing::debug!(key = %line.trim(), "unmapped key ignored"),
                },
                Ok(None) => {
                    tracing::info!("keyboard input closed");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "keyboard input failed");
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letters() {
        assert_eq!(parse_key("a"), Some(Button::A));
        assert_eq!(parse_key("B\n"), Some(Button::B));
        assert_eq!(parse_key(" c "), Some(Button::C));
        assert_eq!(parse_key("d"), Some(Button::D));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse_key("n"), Some(Button::A));
        assert_eq!(parse_key("p"), Some(Button::B));
        assert_eq!(parse_key("r"), Some(Button::C));
        assert_eq!(parse_key(" "), Some(Button::D));
        assert_eq!(parse_key("space"), Some(Button::D));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("x"), None);
        assert_eq!(parse_key("ab"), None);
    }
}
