//! Keybinding definitions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Start editing the measurements
    EnterInsertMode,
    /// Cancel/escape to normal mode
    Cancel,
    /// Run the prediction on the current input
    Predict,
    /// Restore the blank feature template
    ResetTemplate,
    /// Empty the editor
    ClearInput,
    /// Toggle help
    ToggleHelp,
}

/// Actions available in every mode
pub fn global_action(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::F(5) => Some(Action::Predict),
        KeyCode::Char('p') if ctrl => Some(Action::Predict),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        _ => None,
    }
}

/// Get the action for a key in normal mode
pub fn normal_mode_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('i') | KeyCode::Char('e') => Some(Action::EnterInsertMode),
        KeyCode::Char('p') | KeyCode::Enter => Some(Action::Predict),
        KeyCode::Char('r') => Some(Action::ResetTemplate),
        KeyCode::Char('c') => Some(Action::ClearInput),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_predict_keys() {
        let f5 = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        let plain_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);

        assert_eq!(global_action(&f5), Some(Action::Predict));
        assert_eq!(global_action(&ctrl_p), Some(Action::Predict));
        assert_eq!(global_action(&plain_p), None);
    }

    #[test]
    fn test_normal_mode_bindings() {
        assert_eq!(normal_mode_action(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(normal_mode_action(KeyCode::Enter), Some(Action::Predict));
        assert_eq!(
            normal_mode_action(KeyCode::Char('i')),
            Some(Action::EnterInsertMode)
        );
        assert_eq!(normal_mode_action(KeyCode::Char('x')), None);
    }
}
