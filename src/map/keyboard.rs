use anyhow::{bail, Result};

/// Keys understood by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
}

impl std::str::FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            other => bail!("Unknown key: {other}"),
        })
    }
}

/// Result of a key press while the map has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// The focused region moved to this index.
    Moved(usize),
    /// The focused region at this index was chosen.
    Commit(usize),
    /// Keyboard navigation was left.
    Exit,
}

/// Cycles a focused index through an ordered list of regions without a pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardNav {
    focused: bool,
    current: Option<usize>,
}

impl KeyboardNav {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn is_focused(&self) -> bool { self.focused }

    #[inline] pub fn current(&self) -> Option<usize> { self.current }

    /// The map surface received input focus.
    pub fn focus(&mut self) { self.focused = true }

    /// Leave keyboard navigation and forget the focused index.
    pub fn blur(&mut self) {
        self.focused = false;
        self.current = None;
    }

    /// Handle a key over `len` regions. Keys are ignored while unfocused or when there is nothing to cycle.
    pub fn key(&mut self, key: Key, len: usize) -> Option<NavAction> {
        if !self.focused { return None }
        match key {
            Key::Escape => {
                self.blur();
                Some(NavAction::Exit)
            }
            _ if len == 0 => None,
            Key::Right | Key::Down => {
                let next = match self.current {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.current = Some(next);
                Some(NavAction::Moved(next))
            }
            Key::Left | Key::Up => {
                let prev = match self.current {
                    Some(i) if i > 0 && i < len => i - 1,
                    _ => len - 1,
                };
                self.current = Some(prev);
                Some(NavAction::Moved(prev))
            }
            Key::Enter => self.current.filter(|i| *i < len).map(NavAction::Commit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_until_focused() {
        let mut nav = KeyboardNav::new();
        assert_eq!(nav.key(Key::Right, 3), None);
        nav.focus();
        assert_eq!(nav.key(Key::Right, 3), Some(NavAction::Moved(0)));
    }

    #[test]
    fn forward_wraps_to_start() {
        let mut nav = KeyboardNav::new();
        nav.focus();
        let moves: Vec<_> = (0..4).map(|_| nav.key(Key::Down, 3)).collect();
        assert_eq!(moves, vec![
            Some(NavAction::Moved(0)),
            Some(NavAction::Moved(1)),
            Some(NavAction::Moved(2)),
            Some(NavAction::Moved(0)),
        ]);
    }

    #[test]
    fn backward_wraps_to_end() {
        let mut nav = KeyboardNav::new();
        nav.focus();
        assert_eq!(nav.key(Key::Left, 3), Some(NavAction::Moved(2)));
        assert_eq!(nav.key(Key::Up, 3), Some(NavAction::Moved(1)));
        assert_eq!(nav.key(Key::Up, 3), Some(NavAction::Moved(0)));
        assert_eq!(nav.key(Key::Up, 3), Some(NavAction::Moved(2)));
    }

    #[test]
    fn enter_commits_only_after_a_move() {
        let mut nav = KeyboardNav::new();
        nav.focus();
        assert_eq!(nav.key(Key::Enter, 3), None);
        nav.key(Key::Right, 3);
        nav.key(Key::Right, 3);
        assert_eq!(nav.key(Key::Enter, 3), Some(NavAction::Commit(1)));
        assert!(nav.is_focused());
    }

    #[test]
    fn escape_exits_and_resets() {
        let mut nav = KeyboardNav::new();
        nav.focus();
        nav.key(Key::Right, 3);
        assert_eq!(nav.key(Key::Escape, 3), Some(NavAction::Exit));
        assert!(!nav.is_focused());
        assert_eq!(nav.current(), None);
        assert_eq!(nav.key(Key::Right, 3), None);
    }

    #[test]
    fn empty_list_only_handles_escape() {
        let mut nav = KeyboardNav::new();
        nav.focus();
        assert_eq!(nav.key(Key::Right, 0), None);
        assert_eq!(nav.key(Key::Enter, 0), None);
        assert_eq!(nav.key(Key::Escape, 0), Some(NavAction::Exit));
    }

    #[test]
    fn parse_keys() {
        assert_eq!("ArrowRight".parse::<Key>().unwrap(), Key::Right);
        assert_eq!("esc".parse::<Key>().unwrap(), Key::Escape);
        assert!("space".parse::<Key>().is_err());
    }
}
