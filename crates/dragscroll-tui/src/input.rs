use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dragscroll_core::{PointerEvent, PointerPhase, Scope};
use ratatui::layout::{Position, Rect};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleInertia,
    ToggleLockX,
    ToggleLockY,
    ResetScroll,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('i'), KeyModifiers::NONE) => Action::ToggleInertia,
        (KeyCode::Char('x'), KeyModifiers::NONE) => Action::ToggleLockX,
        (KeyCode::Char('y'), KeyModifiers::NONE) => Action::ToggleLockY,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ResetScroll,

        _ => Action::None,
    }
}

/// Translate a terminal mouse event into a pointer event and the scope it lands in.
///
/// A left press inside `viewport` hits the element; everything else is seen
/// only at document scope.
pub fn route_mouse_event(mouse: MouseEvent, viewport: Rect) -> Option<(Scope, PointerEvent)> {
    let x = mouse.column as f64;
    let y = mouse.row as f64;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let scope = if viewport.contains(Position::new(mouse.column, mouse.row)) {
                Scope::Element
            } else {
                Scope::Document
            };
            Some((scope, PointerEvent::mouse(PointerPhase::Down, x, y)))
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some((Scope::Document, PointerEvent::mouse(PointerPhase::Move, x, y)))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            Some((Scope::Document, PointerEvent::mouse(PointerPhase::Up, x, y)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_press_inside_viewport_hits_element() {
        let viewport = Rect::new(0, 0, 40, 20);
        let routed = route_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5), viewport);

        assert_eq!(
            routed,
            Some((Scope::Element, PointerEvent::mouse(PointerPhase::Down, 5.0, 5.0)))
        );
    }

    #[test]
    fn test_press_outside_viewport_stays_at_document() {
        let viewport = Rect::new(0, 0, 40, 20);
        let routed = route_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 21), viewport);

        assert_eq!(routed.map(|(scope, _)| scope), Some(Scope::Document));
    }

    #[test]
    fn test_drag_and_release_are_document_scoped() {
        let viewport = Rect::new(0, 0, 40, 20);

        let drag = route_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 60, 30), viewport);
        assert_eq!(
            drag,
            Some((Scope::Document, PointerEvent::mouse(PointerPhase::Move, 60.0, 30.0)))
        );

        let release = route_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 60, 30), viewport);
        assert_eq!(release.map(|(_, e)| e.phase), Some(PointerPhase::Up));
    }

    #[test]
    fn test_other_buttons_ignored() {
        let viewport = Rect::new(0, 0, 40, 20);
        assert!(route_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), viewport).is_none());
        assert!(route_mouse_event(mouse(MouseEventKind::ScrollDown, 1, 1), viewport).is_none());
    }

    #[test]
    fn test_key_bindings() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('i'), KeyModifiers::NONE)), Action::ToggleInertia);
        assert_eq!(handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE)), Action::None);
    }
}
