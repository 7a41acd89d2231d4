use crate::album::AlbumData;
use crate::app::album_args::parse_album_args;
use crate::app::command_support::{
    app_log, load_settings, missing_api_key_message, sequencing_client,
};
use crate::provider::{
    audit_sequence, build_sequencing_prompt, sequence_result_schema, SequenceResult, Sequencer,
};
use serde_json::json;

const SEQUENCE_USAGE: &str =
    "usage: sonicseq sequence --title <title> [--artist <artist>] [--genre <genre>] --track <title>...";
const PROMPT_USAGE: &str =
    "usage: sonicseq prompt --title <title> [--artist <artist>] [--genre <genre>] --track <title>...";

fn album_from_args(
    args: &[String],
    max_track_count: usize,
    usage: &str,
) -> Result<AlbumData, String> {
    if args.is_empty() {
        return Err(usage.to_string());
    }
    parse_album_args(args)
        .and_then(|parsed| parsed.into_album(max_track_count))
        .map_err(|e| format!("{e}\n{usage}"))
}

pub fn cmd_sequence(args: &[String]) -> Result<String, String> {
    let loaded = load_settings()?;
    let album = album_from_args(args, loaded.settings.max_track_count, SEQUENCE_USAGE)?;
    let log = app_log(&loaded.settings);
    let client = sequencing_client(&loaded.settings, log.clone());
    if !client.has_credential() {
        return Err(missing_api_key_message());
    }

    let result = client.sequence(&album).map_err(|err| {
        log.error(
            "sequencing.failed",
            &err.to_string(),
            &[("kind", json!(err.kind()))],
        );
        format!("sequencing failed: {err}")
    })?;
    log.info(
        "sequencing.succeeded",
        "sequence received",
        &[("sequenced_count", json!(result.sequenced_tracks.len()))],
    );

    let audit = audit_sequence(&album, &result);
    let warnings = audit.warnings();
    for warning in &warnings {
        log.warn("sequencing.audit_warning", warning, &[]);
    }

    let mut lines = vec![
        format!("album={}", album.title),
        format!("artist={}", album.artist),
        format!("genre={}", album.genre),
        format!("model={}", client.model()),
    ];
    lines.extend(render_sequence_result(&result));
    lines.extend(warnings.into_iter().map(|warning| format!("warning={warning}")));
    Ok(lines.join("\n"))
}

pub fn render_sequence_result(result: &SequenceResult) -> Vec<String> {
    let mut lines = vec![format!("sequenced_total={}", result.sequenced_tracks.len())];
    for track in &result.sequenced_tracks {
        let number = track.track_number;
        lines.push(format!("track.{number}={}", track.title));
        lines.push(format!("track.{number}.reasoning={}", track.reasoning));
        if let Some(note) = &track.transition_note {
            lines.push(format!("track.{number}.transition={note}"));
        }
    }
    lines.push(format!("analysis={}", result.album_analysis));
    lines.push(format!("narrative_arc={}", result.narrative_arc));
    lines
}

pub fn cmd_prompt(args: &[String]) -> Result<String, String> {
    let loaded = load_settings()?;
    let album = album_from_args(args, loaded.settings.max_track_count, PROMPT_USAGE)?;
    let client = sequencing_client(&loaded.settings, app_log(&loaded.settings));
    let schema = serde_json::to_string_pretty(&sequence_result_schema())
        .map_err(|e| format!("failed to encode response schema: {e}"))?;

    Ok(format!(
        "endpoint={}\nmodel={}\nprompt:\n{}\nschema:\n{schema}",
        client.endpoint(),
        client.model(),
        build_sequencing_prompt(&album)
    ))
}
