use crate::app::command_support::{app_log, load_settings, sequencing_client};
use crate::provider::Sequencer;
use crate::tui::run_wizard_tui;
use crate::wizard::{
    parse_scripted_keys, wizard_action_from_key, Wizard, WizardEffect, WizardStep,
    SCRIPT_KEYS_ENV,
};
use crossterm::event::KeyEvent;
use std::io::{self, IsTerminal};
use std::sync::Arc;

pub fn cmd_wizard() -> Result<String, String> {
    let loaded = load_settings()?;
    let log = app_log(&loaded.settings);
    let client = sequencing_client(&loaded.settings, log.clone());
    let mut wizard = Wizard::new(loaded.settings.max_track_count, log);

    if let Some(keys) = load_scripted_wizard_keys()? {
        let status = run_wizard_scripted(&mut wizard, &client, keys)?;
        return Ok(wizard_summary(&wizard, status.as_deref()));
    }
    if !is_interactive_terminal() {
        return Err(format!(
            "the wizard needs an interactive terminal; use `sonicseq sequence` or set {SCRIPT_KEYS_ENV}"
        ));
    }

    let credential = client.credential_status();
    run_wizard_tui(&mut wizard, Arc::new(client), credential)?;
    Ok(String::new())
}

fn is_interactive_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_wizard_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}

/// Replays `keys` against the wizard, running any sequencing request inline.
///
/// Stops at a quit action or when the keys run out. Returns the last feedback
/// message, if any.
pub fn run_wizard_scripted(
    wizard: &mut Wizard,
    sequencer: &dyn Sequencer,
    keys: Vec<KeyEvent>,
) -> Result<Option<String>, String> {
    let mut status = None;
    for key in keys {
        let Some(action) = wizard_action_from_key(wizard.step(), key) else {
            continue;
        };
        let transition = wizard.apply(action).map_err(|e| e.to_string())?;
        if transition.feedback.is_some() {
            status = transition.feedback;
        }
        match transition.effect {
            WizardEffect::None | WizardEffect::OpenStep(_) => {}
            WizardEffect::DispatchSequencing(album) => {
                let outcome = sequencer.sequence(&album);
                wizard
                    .complete_sequencing(outcome)
                    .map_err(|e| e.to_string())?;
            }
            WizardEffect::Quit => break,
        }
    }
    Ok(status)
}

pub fn wizard_summary(wizard: &Wizard, status: Option<&str>) -> String {
    let mut lines = vec![format!("step={}", wizard.step())];
    if let Some(status) = status {
        lines.push(format!("status={status}"));
    }
    match wizard.step() {
        WizardStep::Details => {
            lines.push(format!("details.title={}", wizard.details().title));
            lines.push(format!("details.track_count={}", wizard.details().track_count));
        }
        WizardStep::Tracks => {
            lines.push(format!("tracks_total={}", wizard.tracks().len()));
            lines.push(format!("tracks_titled={}", wizard.tracks().ready_count()));
            lines.push(format!("ready={}", wizard.is_ready()));
        }
        WizardStep::Processing => {}
        WizardStep::Results => {
            if let Some(album) = wizard.album() {
                lines.push(format!("album={}", album.title));
                lines.push(format!("artist={}", album.artist));
                lines.push(format!("genre={}", album.genre));
                lines.push(format!("tracks_total={}", album.tracks.len()));
            }
            if let Some(result) = wizard.result() {
                lines.push(format!("sequenced_total={}", result.sequenced_tracks.len()));
                for track in &result.sequenced_tracks {
                    lines.push(format!("track.{}={}", track.track_number, track.title));
                }
            }
            if let Some(audit) = wizard.audit() {
                for warning in audit.warnings() {
                    lines.push(format!("warning={warning}"));
                }
            }
        }
        WizardStep::Error => {
            lines.push(format!(
                "error={}",
                wizard.error_message().unwrap_or_default()
            ));
        }
    }
    lines.join("\n")
}
