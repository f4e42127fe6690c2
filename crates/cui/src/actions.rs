use crate::app::App;
use crate::input::InputAction;
use scoresheet_core::SessionAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Cancel => app.show_help = false,
        InputAction::MoveUp => app.move_cursor(-1, 0),
        InputAction::MoveDown => app.move_cursor(1, 0),
        InputAction::MoveLeft => app.move_cursor(0, -1),
        InputAction::MoveRight => app.move_cursor(0, 1),
        InputAction::EditCell => app.begin_score_edit(None),
        InputAction::EditWithDigit(digit) => app.begin_score_edit(Some(digit)),
        InputAction::RenamePlayer => app.begin_rename(),
        InputAction::AddPlayer => {
            app.apply(SessionAction::AddPlayer);
        }
        InputAction::RemovePlayer => app.remove_player(),
        InputAction::ToggleTotals => {
            app.apply(SessionAction::ToggleHideTotals);
        }
        InputAction::SwitchVariant => {
            app.apply(SessionAction::SelectVariant {
                variant: app.session.choice.toggled(),
            });
        }
        InputAction::OpenSettings => app.open_settings(),
        InputAction::NewGame => app.confirm_new_game(),
    }
}
