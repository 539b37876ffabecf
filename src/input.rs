use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::events::Event;
use crate::snake::Direction;

/// Translates a key press into a loop event.
///
/// Arrows and WASD steer, Esc/q quits, Enter/Space confirm, Ctrl+C
/// requests shutdown. Key releases are ignored.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Event::Shutdown);
    }

    let event = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Event::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Event::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Event::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Event::Turn(Direction::Right)
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Event::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => Event::Confirm,
        _ => return None,
    };

    Some(event)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::events::Event;
    use crate::snake::Direction;

    use super::map_key;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_map_to_turns() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Event::Turn(Direction::Up)));
        assert_eq!(
            map_key(press(KeyCode::Char('s'))),
            Some(Event::Turn(Direction::Down))
        );
        assert_eq!(
            map_key(press(KeyCode::Left)),
            Some(Event::Turn(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('d'))),
            Some(Event::Turn(Direction::Right))
        );
    }

    #[test]
    fn quit_and_shutdown_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Event::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Event::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Shutdown)
        );
    }

    #[test]
    fn releases_and_unbound_keys_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
    }
}
