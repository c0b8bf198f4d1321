use blocknav_engine::editing::{Direction, Intent, MoveUnit, Movement};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Edit(Intent),
    Save,
    Quit,
    Ignore,
}

pub fn key_action(key: KeyEvent) -> Action {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let word_or_char = if ctrl || alt {
        MoveUnit::Word
    } else {
        MoveUnit::Character
    };
    let movement = |direction, unit| {
        let movement = Movement::new(direction).by(unit);
        let movement = if shift { movement.extending() } else { movement };
        Action::Edit(Intent::Move(movement))
    };

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('q') if ctrl => Action::Quit,
        KeyCode::Char('s') if ctrl => Action::Save,
        KeyCode::Char('a') if ctrl => Action::Edit(Intent::SelectAll),
        KeyCode::Left => movement(Direction::Left, word_or_char),
        KeyCode::Right => movement(Direction::Right, word_or_char),
        KeyCode::Up => movement(Direction::Up, MoveUnit::Character),
        KeyCode::Down => movement(Direction::Down, MoveUnit::Character),
        KeyCode::Home => movement(Direction::Left, MoveUnit::LineEdge),
        KeyCode::End => movement(Direction::Right, MoveUnit::LineEdge),
        KeyCode::Delete => Action::Edit(Intent::DeleteForward),
        KeyCode::Backspace => Action::Edit(Intent::DeleteBackward),
        KeyCode::Enter => Action::Edit(Intent::SplitParagraph),
        KeyCode::Char(c) if !ctrl && !alt => Action::Edit(Intent::InsertText(c.to_string())),
        _ => Action::Ignore,
    }
}
