use crate::provider::types::{
    GenerateContentResponse, RawSequenceResult, RawSequencedTrack, SequenceResult, SequencedTrack,
    SequencingError,
};

/// Pulls the generated JSON text out of a `generateContent` response body.
pub fn extract_candidate_text(body: &str) -> Result<String, SequencingError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(SequencingError::response("provider returned an empty body"));
    }

    let envelope: GenerateContentResponse = serde_json::from_str(trimmed)
        .map_err(|err| SequencingError::response(format!("invalid response envelope: {err}")))?;

    let Some(candidate) = envelope.candidates.first() else {
        let reason = match envelope
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            Some(block_reason) => format!("no candidates returned (blocked: {block_reason})"),
            None => "no candidates returned".to_string(),
        };
        return Err(SequencingError::response(reason));
    };

    let text = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = match &candidate.finish_reason {
            Some(finish_reason) => format!("candidate had no text (finish reason {finish_reason})"),
            None => "candidate had no text".to_string(),
        };
        return Err(SequencingError::response(reason));
    }
    Ok(text)
}

/// Parses the structured JSON document and applies post-parse validation.
pub fn parse_sequence_result(text: &str) -> Result<SequenceResult, SequencingError> {
    let raw: RawSequenceResult = serde_json::from_str(text.trim())
        .map_err(|err| SequencingError::response(format!("invalid sequence json: {err}")))?;
    validate_sequence_result(raw)
}

fn validate_sequence_result(raw: RawSequenceResult) -> Result<SequenceResult, SequencingError> {
    if raw.sequenced_tracks.is_empty() {
        return Err(SequencingError::response(
            "sequencedTracks must contain at least one track",
        ));
    }

    let sequenced_tracks = raw
        .sequenced_tracks
        .into_iter()
        .enumerate()
        .map(|(position, track)| validate_track(position, track))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SequenceResult {
        sequenced_tracks,
        album_analysis: raw.album_analysis,
        narrative_arc: raw.narrative_arc,
    })
}

fn validate_track(
    position: usize,
    raw: RawSequencedTrack,
) -> Result<SequencedTrack, SequencingError> {
    let number = raw.track_number;
    if !number.is_finite() || number.fract() != 0.0 || number < 1.0 || number > f64::from(u32::MAX)
    {
        return Err(SequencingError::response(format!(
            "sequencedTracks[{position}].trackNumber must be a positive integer, got {number}"
        )));
    }
    let transition_note = raw.transition_note.filter(|note| !note.trim().is_empty());
    Ok(SequencedTrack {
        track_number: number as u32,
        title: raw.title,
        reasoning: raw.reasoning,
        transition_note,
    })
}
