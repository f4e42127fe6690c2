use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Cancel,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    EditCell,
    EditWithDigit(char),
    RenamePlayer,
    AddPlayer,
    RemovePlayer,
    ToggleTotals,
    SwitchVariant,
    OpenSettings,
    NewGame,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Cancel,
        KeyCode::Up | KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Left | KeyCode::Char('h') => InputAction::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => InputAction::MoveRight,
        KeyCode::BackTab => InputAction::MoveLeft,
        KeyCode::Enter => InputAction::EditCell,
        KeyCode::Char(ch) if ch.is_ascii_digit() => InputAction::EditWithDigit(ch),
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('r') => InputAction::RenamePlayer,
        KeyCode::Char('a') => InputAction::AddPlayer,
        KeyCode::Char('x') => InputAction::RemovePlayer,
        KeyCode::Char('t') => InputAction::ToggleTotals,
        KeyCode::Char('v') => InputAction::SwitchVariant,
        KeyCode::Char('s') => InputAction::OpenSettings,
        KeyCode::Char('N') => InputAction::NewGame,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_movement_keys() {
        assert_eq!(map_key(key(KeyCode::Up)), InputAction::MoveUp);
        assert_eq!(map_key(key(KeyCode::Char('j'))), InputAction::MoveDown);
        assert_eq!(map_key(key(KeyCode::Char('h'))), InputAction::MoveLeft);
        assert_eq!(map_key(key(KeyCode::Tab)), InputAction::MoveRight);
    }

    #[test]
    fn digits_start_an_edit() {
        assert_eq!(map_key(key(KeyCode::Char('7'))), InputAction::EditWithDigit('7'));
        assert_eq!(map_key(key(KeyCode::Enter)), InputAction::EditCell);
    }

    #[test]
    fn maps_sheet_commands() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), InputAction::AddPlayer);
        assert_eq!(map_key(key(KeyCode::Char('x'))), InputAction::RemovePlayer);
        assert_eq!(map_key(key(KeyCode::Char('t'))), InputAction::ToggleTotals);
        assert_eq!(map_key(key(KeyCode::Char('v'))), InputAction::SwitchVariant);
        assert_eq!(map_key(key(KeyCode::Char('q'))), InputAction::Quit);
    }

    #[test]
    fn new_game_needs_shift() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            InputAction::NewGame
        );
        assert_eq!(map_key(key(KeyCode::Char('n'))), InputAction::None);
    }
}
