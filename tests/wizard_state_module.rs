use serde_json::Value;
use sonicseq::provider::{SequenceResult, SequencedTrack, SequencingError};
use sonicseq::shared::AppLog;
use sonicseq::wizard::{
    Wizard, WizardAction, WizardEffect, WizardError, WizardStep, RESULTS_PAGE_LINES,
    SEQUENCING_FAILED_MESSAGE,
};
use std::fs;
use tempfile::tempdir;

fn type_text(wizard: &mut Wizard, text: &str) {
    for ch in text.chars() {
        wizard.apply(WizardAction::Input(ch)).expect("input");
    }
}

fn endless_summer_wizard() -> Wizard {
    let mut wizard = Wizard::default();
    wizard.apply(WizardAction::FocusNext).expect("focus title");
    type_text(&mut wizard, "Endless Summer");
    wizard.apply(WizardAction::FocusNext).expect("focus genre");
    wizard.apply(WizardAction::FocusNext).expect("focus count");
    type_text(&mut wizard, "3");
    wizard.apply(WizardAction::Submit).expect("submit details");
    wizard
}

fn fill_two_tracks(wizard: &mut Wizard) {
    type_text(wizard, "Sundown");
    wizard.apply(WizardAction::FocusNext).expect("next row");
    type_text(wizard, "Drive");
}

fn sample_result() -> SequenceResult {
    SequenceResult {
        sequenced_tracks: vec![
            SequencedTrack {
                track_number: 1,
                title: "Drive".to_string(),
                reasoning: "Opens with momentum.".to_string(),
                transition_note: Some("Fade into dusk.".to_string()),
            },
            SequencedTrack {
                track_number: 2,
                title: "Sundown".to_string(),
                reasoning: "Closes the night.".to_string(),
                transition_note: None,
            },
        ],
        album_analysis: "Warm synths.".to_string(),
        narrative_arc: "Day into night.".to_string(),
    }
}

#[test]
fn wizard_state_module_empty_title_stays_on_details() {
    let mut wizard = Wizard::default();
    wizard.details_mut().track_count = "5".to_string();

    let transition = wizard.apply(WizardAction::Submit).expect("submit");

    assert_eq!(wizard.step(), WizardStep::Details);
    assert_eq!(transition.effect, WizardEffect::None);
    assert!(transition.feedback.is_some());
    assert!(wizard.tracks().is_empty());
}

#[test]
fn wizard_state_module_details_submit_seeds_target_rows() {
    let mut wizard = Wizard::default();
    wizard.details_mut().title = "Night Drive".to_string();
    wizard.details_mut().track_count = "5".to_string();

    let transition = wizard.apply(WizardAction::Submit).expect("submit");

    assert_eq!(transition.effect, WizardEffect::OpenStep(WizardStep::Tracks));
    assert_eq!(wizard.step(), WizardStep::Tracks);
    assert_eq!(wizard.target_count(), 5);
    assert_eq!(wizard.tracks().len(), 5);
}

#[test]
fn wizard_state_module_count_above_limit_is_rejected() {
    let mut wizard = Wizard::new(4, AppLog::disabled());
    wizard.details_mut().title = "Night Drive".to_string();
    wizard.details_mut().track_count = "5".to_string();

    let transition = wizard.apply(WizardAction::Submit).expect("submit");

    assert_eq!(wizard.step(), WizardStep::Details);
    assert_eq!(
        transition.feedback.as_deref(),
        Some("Track count must be at most 4.")
    );
}

#[test]
fn wizard_state_module_endless_summer_payload_applies_defaults() {
    let mut wizard = endless_summer_wizard();
    assert_eq!(wizard.step(), WizardStep::Tracks);
    assert!(!wizard.is_ready());
    fill_two_tracks(&mut wizard);
    assert!(wizard.is_ready());

    let transition = wizard.apply(WizardAction::Submit).expect("submit tracks");

    let WizardEffect::DispatchSequencing(album) = transition.effect else {
        panic!("expected sequencing dispatch, got {:?}", transition.effect);
    };
    assert_eq!(wizard.step(), WizardStep::Processing);
    assert_eq!(album.artist, "Unknown Artist");
    assert_eq!(album.genre, "Unspecified");
    assert_eq!(album.title, "Endless Summer");
    assert_eq!(
        album.track_titles().collect::<Vec<_>>(),
        vec!["Sundown", "Drive", ""]
    );
}

#[test]
fn wizard_state_module_not_ready_tracks_do_not_dispatch() {
    let mut wizard = endless_summer_wizard();
    type_text(&mut wizard, "Sundown");

    let transition = wizard.apply(WizardAction::Submit).expect("submit tracks");

    assert_eq!(transition.effect, WizardEffect::None);
    assert_eq!(wizard.step(), WizardStep::Tracks);
}

#[test]
fn wizard_state_module_back_keeps_form_and_clears_rows() {
    let mut wizard = endless_summer_wizard();
    fill_two_tracks(&mut wizard);

    wizard.apply(WizardAction::Back).expect("back");

    assert_eq!(wizard.step(), WizardStep::Details);
    assert_eq!(wizard.details().title, "Endless Summer");
    assert!(wizard.tracks().is_empty());

    wizard.apply(WizardAction::Submit).expect("resubmit");
    assert_eq!(wizard.tracks().ready_count(), 0);
    assert_eq!(wizard.tracks().len(), 3);
}

#[test]
fn wizard_state_module_success_reaches_results_in_provided_order() {
    let mut wizard = endless_summer_wizard();
    fill_two_tracks(&mut wizard);
    wizard.apply(WizardAction::Submit).expect("submit tracks");

    let transition = wizard
        .complete_sequencing(Ok(sample_result()))
        .expect("complete");

    assert_eq!(
        transition.effect,
        WizardEffect::OpenStep(WizardStep::Results)
    );
    let titles = wizard
        .result()
        .expect("result")
        .sequenced_tracks
        .iter()
        .map(|track| track.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Drive", "Sundown"]);
    assert!(wizard.audit().expect("audit").is_clean());
}

#[test]
fn wizard_state_module_failure_shows_fixed_message_and_try_again_resets() {
    let mut wizard = endless_summer_wizard();
    fill_two_tracks(&mut wizard);
    wizard.apply(WizardAction::Submit).expect("submit tracks");

    wizard
        .complete_sequencing(Err(SequencingError::Provider(
            "unexpected status 500".to_string(),
        )))
        .expect("complete");
    assert_eq!(wizard.step(), WizardStep::Error);
    assert_eq!(wizard.error_message(), Some(SEQUENCING_FAILED_MESSAGE));

    let transition = wizard.apply(WizardAction::Reset).expect("try again");

    assert_eq!(
        transition.effect,
        WizardEffect::OpenStep(WizardStep::Details)
    );
    assert_eq!(wizard.step(), WizardStep::Details);
    assert!(wizard.details().title.is_empty());
    assert!(wizard.tracks().is_empty());
    assert!(wizard.album().is_none());
    assert!(wizard.result().is_none());
    assert!(wizard.error_message().is_none());
}

#[test]
fn wizard_state_module_results_scroll_moves_and_resets() {
    let mut wizard = endless_summer_wizard();
    fill_two_tracks(&mut wizard);
    wizard.apply(WizardAction::Submit).expect("submit tracks");
    wizard
        .complete_sequencing(Ok(sample_result()))
        .expect("complete");
    assert_eq!(wizard.results_scroll(), 0);

    wizard.apply(WizardAction::ScrollUp).expect("scroll up at top");
    assert_eq!(wizard.results_scroll(), 0);
    wizard.apply(WizardAction::ScrollDown).expect("scroll down");
    wizard.apply(WizardAction::PageDown).expect("page down");
    assert_eq!(wizard.results_scroll(), 1 + RESULTS_PAGE_LINES);
    assert_eq!(wizard.step(), WizardStep::Results);

    wizard.clamp_results_scroll(4);
    assert_eq!(wizard.results_scroll(), 4);
    wizard.apply(WizardAction::PageUp).expect("page up");
    assert_eq!(wizard.results_scroll(), 0);

    wizard.apply(WizardAction::ScrollDown).expect("scroll down");
    wizard.apply(WizardAction::Reset).expect("start over");
    assert_eq!(wizard.results_scroll(), 0);
}

#[test]
fn wizard_state_module_scroll_is_only_valid_on_results() {
    let mut wizard = endless_summer_wizard();
    assert_eq!(
        wizard.apply(WizardAction::ScrollDown),
        Err(WizardError::InvalidTransition {
            step: WizardStep::Tracks,
            action: WizardAction::ScrollDown,
        })
    );

    fill_two_tracks(&mut wizard);
    wizard.apply(WizardAction::Submit).expect("submit tracks");
    wizard
        .complete_sequencing(Err(SequencingError::Provider("boom".to_string())))
        .expect("complete");
    assert_eq!(
        wizard.apply(WizardAction::PageDown),
        Err(WizardError::InvalidTransition {
            step: WizardStep::Error,
            action: WizardAction::PageDown,
        })
    );
}

#[test]
fn wizard_state_module_rejects_actions_outside_their_step() {
    let mut wizard = Wizard::default();
    assert_eq!(
        wizard.apply(WizardAction::AddTrack),
        Err(WizardError::InvalidTransition {
            step: WizardStep::Details,
            action: WizardAction::AddTrack,
        })
    );
    assert_eq!(
        wizard.complete_sequencing(Ok(sample_result())),
        Err(WizardError::NotProcessing(WizardStep::Details))
    );
}

#[test]
fn wizard_state_module_logs_lifecycle_events() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("logs/sonicseq.log");
    let mut wizard = Wizard::new(30, AppLog::at(&log_path));
    wizard.details_mut().title = "Endless Summer".to_string();
    wizard.details_mut().track_count = "2".to_string();
    wizard.apply(WizardAction::Submit).expect("details");
    fill_two_tracks(&mut wizard);
    wizard.apply(WizardAction::Submit).expect("tracks");
    wizard
        .complete_sequencing(Err(SequencingError::Configuration(
            "API key is missing".to_string(),
        )))
        .expect("complete");
    wizard.apply(WizardAction::Reset).expect("reset");

    let raw = fs::read_to_string(&log_path).expect("read log");
    let events = raw
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).expect("json line"))
        .collect::<Vec<_>>();
    let names = events
        .iter()
        .map(|event| event["event"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "wizard.details_submitted",
            "wizard.sequence_dispatched",
            "sequencing.failed",
            "wizard.reset",
        ]
    );
    assert_eq!(events[2]["level"], "error");
    assert_eq!(events[2]["kind"], "configuration");
}
