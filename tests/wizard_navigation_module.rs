use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sonicseq::wizard::{
    hint_text, parse_scripted_keys, wizard_action_from_key, WizardAction, WizardStep,
};

fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn wizard_navigation_module_maps_escape_by_step() {
    assert_eq!(
        wizard_action_from_key(WizardStep::Details, key_event(KeyCode::Esc)),
        Some(WizardAction::Quit)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::Tracks, key_event(KeyCode::Esc)),
        Some(WizardAction::Back)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::Error, key_event(KeyCode::Esc)),
        Some(WizardAction::Quit)
    );
}

#[test]
fn wizard_navigation_module_processing_ignores_everything_but_ctrl_c() {
    assert_eq!(
        wizard_action_from_key(WizardStep::Processing, key_event(KeyCode::Enter)),
        None
    );
    assert_eq!(
        wizard_action_from_key(
            WizardStep::Processing,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ),
        Some(WizardAction::Quit)
    );
}

#[test]
fn wizard_navigation_module_tracks_modifiers_select_list_edits() {
    let step = WizardStep::Tracks;
    assert_eq!(
        wizard_action_from_key(step, KeyEvent::new(KeyCode::Up, KeyModifiers::ALT)),
        Some(WizardAction::MoveTrackUp)
    );
    assert_eq!(
        wizard_action_from_key(step, KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)),
        Some(WizardAction::AddTrack)
    );
    assert_eq!(
        wizard_action_from_key(step, key_event(KeyCode::Delete)),
        Some(WizardAction::RemoveTrack)
    );
    assert_eq!(
        wizard_action_from_key(step, key_event(KeyCode::Char('r'))),
        Some(WizardAction::Input('r'))
    );
}

#[test]
fn wizard_navigation_module_results_letters_reset_and_quit() {
    assert_eq!(
        wizard_action_from_key(WizardStep::Results, key_event(KeyCode::Char('r'))),
        Some(WizardAction::Reset)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::Results, key_event(KeyCode::Char('q'))),
        Some(WizardAction::Quit)
    );
}

#[test]
fn wizard_navigation_module_results_arrows_and_pages_scroll() {
    for (code, action) in [
        (KeyCode::Up, WizardAction::ScrollUp),
        (KeyCode::Down, WizardAction::ScrollDown),
        (KeyCode::PageUp, WizardAction::PageUp),
        (KeyCode::PageDown, WizardAction::PageDown),
    ] {
        assert_eq!(
            wizard_action_from_key(WizardStep::Results, key_event(code)),
            Some(action)
        );
    }
    assert_eq!(
        wizard_action_from_key(WizardStep::Error, key_event(KeyCode::Down)),
        None
    );
    assert!(hint_text(WizardStep::Results).contains("PgUp/PgDn"));
}

#[test]
fn wizard_navigation_module_script_tokens_cover_paging() {
    let keys = parse_scripted_keys("pagedown,pageup").expect("parse paging keys");
    let codes = keys.iter().map(|key| key.code).collect::<Vec<_>>();
    assert_eq!(codes, vec![KeyCode::PageDown, KeyCode::PageUp]);
}

#[test]
fn wizard_navigation_module_parses_scripted_keys() {
    let keys = parse_scripted_keys("tab, type:Endless Summer ,enter,ctrl-n,alt-up")
        .expect("parse scripted keys");
    let typed = keys
        .iter()
        .filter_map(|key| match key.code {
            KeyCode::Char(ch) if key.modifiers == KeyModifiers::NONE => Some(ch),
            _ => None,
        })
        .collect::<String>();
    assert_eq!(typed, "Endless Summer ");
    assert_eq!(keys.first().map(|key| key.code), Some(KeyCode::Tab));
    assert_eq!(
        keys.last().copied(),
        Some(KeyEvent::new(KeyCode::Up, KeyModifiers::ALT))
    );
}

#[test]
fn wizard_navigation_module_rejects_unknown_script_tokens() {
    let err = parse_scripted_keys("enter,shuffle").expect_err("unknown token");
    assert!(err.contains("`shuffle`"), "{err}");
}
