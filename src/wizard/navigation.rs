use crate::wizard::state::{WizardAction, WizardStep};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "SONICSEQ_SCRIPT_KEYS";

const DETAILS_HINT_TEXT: &str = "Tab/Up/Down field | type to edit | Enter continue | Esc quit";
const TRACKS_HINT_TEXT: &str =
    "Up/Down row | Alt+Up/Down reorder | Ctrl+N add | Ctrl+D remove | Enter sequence | Esc back";
const PROCESSING_HINT_TEXT: &str = "Waiting for the sequencing service | Ctrl+C quit";
const RESULTS_HINT_TEXT: &str = "Up/Down scroll | PgUp/PgDn page | Enter/r start over | Esc/q quit";
const ERROR_HINT_TEXT: &str = "Enter/r try again | Esc/q quit";

pub fn hint_text(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Details => DETAILS_HINT_TEXT,
        WizardStep::Tracks => TRACKS_HINT_TEXT,
        WizardStep::Processing => PROCESSING_HINT_TEXT,
        WizardStep::Results => RESULTS_HINT_TEXT,
        WizardStep::Error => ERROR_HINT_TEXT,
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

fn plain_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) => Some(ch),
        _ => None,
    }
}

pub fn wizard_action_from_key(step: WizardStep, key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(WizardAction::Quit);
    }

    match step {
        WizardStep::Details => match key.code {
            KeyCode::Esc => Some(WizardAction::Quit),
            KeyCode::Enter => Some(WizardAction::Submit),
            KeyCode::Tab | KeyCode::Down => Some(WizardAction::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(WizardAction::FocusPrev),
            KeyCode::Backspace => Some(WizardAction::Backspace),
            _ => plain_char(&key).map(WizardAction::Input),
        },
        WizardStep::Tracks => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                return match key.code {
                    KeyCode::Up => Some(WizardAction::MoveTrackUp),
                    KeyCode::Down => Some(WizardAction::MoveTrackDown),
                    _ => None,
                };
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return match key.code {
                    KeyCode::Char('n') => Some(WizardAction::AddTrack),
                    KeyCode::Char('d') => Some(WizardAction::RemoveTrack),
                    _ => None,
                };
            }
            match key.code {
                KeyCode::Esc => Some(WizardAction::Back),
                KeyCode::Enter => Some(WizardAction::Submit),
                KeyCode::Up | KeyCode::BackTab => Some(WizardAction::FocusPrev),
                KeyCode::Down | KeyCode::Tab => Some(WizardAction::FocusNext),
                KeyCode::Insert => Some(WizardAction::AddTrack),
                KeyCode::Delete => Some(WizardAction::RemoveTrack),
                KeyCode::Backspace => Some(WizardAction::Backspace),
                _ => plain_char(&key).map(WizardAction::Input),
            }
        }
        WizardStep::Processing => None,
        WizardStep::Results => match key.code {
            KeyCode::Up => Some(WizardAction::ScrollUp),
            KeyCode::Down => Some(WizardAction::ScrollDown),
            KeyCode::PageUp => Some(WizardAction::PageUp),
            KeyCode::PageDown => Some(WizardAction::PageDown),
            KeyCode::Enter | KeyCode::Char('r') => Some(WizardAction::Reset),
            KeyCode::Esc | KeyCode::Char('q') => Some(WizardAction::Quit),
            _ => None,
        },
        WizardStep::Error => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Some(WizardAction::Reset),
            KeyCode::Esc | KeyCode::Char('q') => Some(WizardAction::Quit),
            _ => None,
        },
    }
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

/// Parses a comma-separated key script.
///
/// Named tokens cover navigation keys; `type:<text>` expands to one key
/// press per character of `<text>`.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        if let Some(text) = token.trim_start().strip_prefix("type:") {
            keys.extend(
                text.chars()
                    .map(|ch| key(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let event = match normalized.as_str() {
            "up" => key(KeyCode::Up, KeyModifiers::NONE),
            "down" => key(KeyCode::Down, KeyModifiers::NONE),
            "tab" => key(KeyCode::Tab, KeyModifiers::NONE),
            "backtab" => key(KeyCode::BackTab, KeyModifiers::SHIFT),
            "enter" => key(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => key(KeyCode::Esc, KeyModifiers::NONE),
            "backspace" => key(KeyCode::Backspace, KeyModifiers::NONE),
            "delete" => key(KeyCode::Delete, KeyModifiers::NONE),
            "space" => key(KeyCode::Char(' '), KeyModifiers::NONE),
            "pageup" => key(KeyCode::PageUp, KeyModifiers::NONE),
            "pagedown" => key(KeyCode::PageDown, KeyModifiers::NONE),
            "alt-up" => key(KeyCode::Up, KeyModifiers::ALT),
            "alt-down" => key(KeyCode::Down, KeyModifiers::ALT),
            "ctrl-n" => key(KeyCode::Char('n'), KeyModifiers::CONTROL),
            "ctrl-d" => key(KeyCode::Char('d'), KeyModifiers::CONTROL),
            "ctrl-c" => key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "r" => key(KeyCode::Char('r'), KeyModifiers::NONE),
            "q" => key(KeyCode::Char('q'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV} token `{other}`; valid tokens: up,down,tab,backtab,enter,esc,backspace,delete,space,pageup,pagedown,alt-up,alt-down,ctrl-n,ctrl-d,ctrl-c,r,q,type:<text>"
                ));
            }
        };
        keys.push(event);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_selection_handles_empty_and_overflow() {
        assert_eq!(clamp_selection(4, 0), 0);
        assert_eq!(clamp_selection(4, 3), 2);
        assert_eq!(clamp_selection(1, 3), 1);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(wizard_action_from_key(WizardStep::Details, event), None);
    }
}
