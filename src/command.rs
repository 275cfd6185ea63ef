use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::samples::Difficulty;

/// What a key press asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Retry,
    SelectDifficulty(Difficulty),
    Type(char),
    Backspace,
    Quit,
}

impl Command {
    /// Map a key to a command. While `typing`, printable keys go to the input
    /// buffer; otherwise they act as shortcuts.
    pub fn from_key(key: KeyEvent, typing: bool) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // AltGr arrives as Ctrl+Alt and produces ordinary characters
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);
        if ctrl {
            return match key.code {
                KeyCode::Char('c') => Some(Self::Quit),
                _ => None,
            };
        }

        if typing {
            match key.code {
                KeyCode::Char(c) => Some(Self::Type(c)),
                KeyCode::Backspace => Some(Self::Backspace),
                KeyCode::Enter | KeyCode::Esc => Some(Self::Stop),
                _ => None,
            }
        } else {
            match key.code {
                KeyCode::Char('s') | KeyCode::Enter => Some(Self::Start),
                KeyCode::Char('r') => Some(Self::Retry),
                KeyCode::Char('1') => Some(Self::SelectDifficulty(Difficulty::Easy)),
                KeyCode::Char('2') => Some(Self::SelectDifficulty(Difficulty::Medium)),
                KeyCode::Char('3') => Some(Self::SelectDifficulty(Difficulty::Hard)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_chars_go_to_buffer() {
        assert_eq!(
            Command::from_key(key(KeyCode::Char('s')), true),
            Some(Command::Type('s'))
        );
        assert_eq!(
            Command::from_key(key(KeyCode::Char(' ')), true),
            Some(Command::Type(' '))
        );
        assert_eq!(
            Command::from_key(key(KeyCode::Backspace), true),
            Some(Command::Backspace)
        );
    }

    #[test]
    fn test_typing_enter_and_esc_stop() {
        assert_eq!(Command::from_key(key(KeyCode::Enter), true), Some(Command::Stop));
        assert_eq!(Command::from_key(key(KeyCode::Esc), true), Some(Command::Stop));
    }

    #[test]
    fn test_shortcuts_when_not_typing() {
        assert_eq!(
            Command::from_key(key(KeyCode::Char('s')), false),
            Some(Command::Start)
        );
        assert_eq!(Command::from_key(key(KeyCode::Enter), false), Some(Command::Start));
        assert_eq!(
            Command::from_key(key(KeyCode::Char('r')), false),
            Some(Command::Retry)
        );
        assert_eq!(
            Command::from_key(key(KeyCode::Char('3')), false),
            Some(Command::SelectDifficulty(Difficulty::Hard))
        );
        assert_eq!(Command::from_key(key(KeyCode::Esc), false), Some(Command::Quit));
        assert_eq!(Command::from_key(key(KeyCode::Char('x')), false), None);
        assert_eq!(Command::from_key(key(KeyCode::Backspace), false), None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(Command::from_key(ctrl_c, true), Some(Command::Quit));
        assert_eq!(Command::from_key(ctrl_c, false), Some(Command::Quit));
    }

    #[test]
    fn test_altgr_chars_are_typed() {
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;

        assert_eq!(
            Command::from_key(KeyEvent::new(KeyCode::Char('@'), altgr), true),
            Some(Command::Type('@'))
        );
        assert_eq!(
            Command::from_key(KeyEvent::new(KeyCode::Char('c'), altgr), true),
            Some(Command::Type('c'))
        );
        assert_eq!(
            Command::from_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL), true),
            None
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(Command::from_key(release, true), None);
    }
}
