//! Input/keyboard event handling
//!
//! Keys are checked once per cycle, after rendering, without ever waiting:
//! - `Q` quits (as does Ctrl+C, which raw mode turns into a key press)
//! - `C` / `M` sort by CPU / memory
//! - `D` / `A` sort descending / ascending

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{SortDirection, SortField, SortState};

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue running the application
    Continue,
    /// Exit the application
    Exit,
}

/// Something that can be asked for a pending key without blocking
pub trait KeySource {
    /// Consumes pending events up to and including the first key press.
    ///
    /// Returns `Ok(None)` immediately when no key press is pending.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Reads key presses from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let pending = std::iter::from_fn(|| match event::poll(Duration::ZERO) {
            Ok(true) => Some(event::read()),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        });
        first_press(pending)
    }
}

/// Skips events until a key press shows up or `events` runs dry.
///
/// Release and repeat events (Windows reports a release for every press),
/// resizes, focus and mouse events are dropped.
fn first_press<I>(events: I) -> io::Result<Option<KeyEvent>>
where
    I: IntoIterator<Item = io::Result<Event>>,
{
    for event in events {
        if let Event::Key(key) = event? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

/// A user command understood by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    SortBy(SortField),
    Order(SortDirection),
}

impl Command {
    /// Maps a key press to a command, ignoring case.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => Some(Command::Quit),
                'c' => Some(Command::SortBy(SortField::Cpu)),
                'm' => Some(Command::SortBy(SortField::Memory)),
                'd' => Some(Command::Order(SortDirection::Descending)),
                'a' => Some(Command::Order(SortDirection::Ascending)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Applies the command to the sort state.
    pub fn apply(self, sort: &mut SortState) -> KeyAction {
        match self {
            Command::Quit => return KeyAction::Exit,
            Command::SortBy(field) => sort.field = field,
            Command::Order(direction) => sort.direction = direction,
        }
        KeyAction::Continue
    }
}

/// Handles at most one pending key press.
///
/// Returns `KeyAction::Exit` if the user asked to quit.
pub fn poll_and_apply<K: KeySource + ?Sized>(
    keys: &mut K,
    sort: &mut SortState,
) -> io::Result<KeyAction> {
    let Some(key) = keys.next_key()? else {
        return Ok(KeyAction::Continue);
    };

    match Command::from_key(&key) {
        Some(command) => {
            let action = command.apply(sort);
            log::debug!(
                "key {:?}: sorting by {} {:?}",
                key.code,
                sort.field.name(),
                sort.direction
            );
            Ok(action)
        }
        None => Ok(KeyAction::Continue),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Key source fed from a queue; `None` entries mean "nothing pending".
    #[derive(Default)]
    pub struct ScriptedKeys {
        pub queue: VecDeque<Option<KeyEvent>>,
    }

    impl ScriptedKeys {
        pub fn chars(keys: &[Option<char>]) -> Self {
            Self {
                queue: keys
                    .iter()
                    .map(|key| key.map(|c| KeyEvent::from(KeyCode::Char(c))))
                    .collect(),
            }
        }
    }

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
            Ok(self.queue.pop_front().flatten())
        }
    }

    #[test]
    fn test_commands_ignore_case() {
        for (c, expected) in [
            ('q', Command::Quit),
            ('Q', Command::Quit),
            ('c', Command::SortBy(SortField::Cpu)),
            ('M', Command::SortBy(SortField::Memory)),
            ('d', Command::Order(SortDirection::Descending)),
            ('A', Command::Order(SortDirection::Ascending)),
        ] {
            let key = KeyEvent::from(KeyCode::Char(c));
            assert_eq!(Command::from_key(&key), Some(expected), "key {c}");
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(Command::from_key(&KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key(&KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(&key), Some(Command::Quit));
    }

    #[test]
    fn test_no_pending_key_continues() {
        let mut keys = ScriptedKeys::default();
        let mut sort = SortState::default();
        assert_eq!(
            poll_and_apply(&mut keys, &mut sort).unwrap(),
            KeyAction::Continue
        );
        assert_eq!(sort, SortState::default());
    }

    fn release(c: char) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(c),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::from(KeyCode::Char(c)))
    }

    #[test]
    fn test_first_press_skips_other_events() {
        let mut events = vec![
            Ok(release('m')),
            Ok(Event::Resize(80, 24)),
            Ok(Event::FocusGained),
            Ok(press('a')),
            Ok(release('a')),
        ]
        .into_iter();

        let key = first_press(&mut events).unwrap().expect("press after the release");
        assert_eq!(key.code, KeyCode::Char('a'));
        // the trailing release is left for the next cycle
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_first_press_without_press() {
        let events = vec![Ok(release('m')), Ok(Event::FocusLost)];
        assert!(first_press(events).unwrap().is_none());
        assert!(first_press(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_first_press_stops_at_error() {
        let events = vec![
            Ok(release('m')),
            Err(io::Error::new(io::ErrorKind::Other, "tty closed")),
            Ok(press('q')),
        ];
        assert!(first_press(events).is_err());
    }

    #[test]
    fn test_one_key_per_poll() {
        let mut keys = ScriptedKeys::chars(&[Some('m'), Some('a'), Some('q')]);
        let mut sort = SortState::default();

        assert_eq!(poll_and_apply(&mut keys, &mut sort).unwrap(), KeyAction::Continue);
        assert_eq!(sort, SortState::new(SortField::Memory, SortDirection::Descending));

        assert_eq!(poll_and_apply(&mut keys, &mut sort).unwrap(), KeyAction::Continue);
        assert_eq!(sort, SortState::new(SortField::Memory, SortDirection::Ascending));

        assert_eq!(poll_and_apply(&mut keys, &mut sort).unwrap(), KeyAction::Exit);
        assert_eq!(sort, SortState::new(SortField::Memory, SortDirection::Ascending));
    }
}
