use crate::album::AlbumData;
use crate::provider::types::SequenceResult;
use std::collections::BTreeMap;

/// Differences between the submitted titles and the titles the provider
/// returned. Informational: a non-clean audit never fails a sequencing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceAudit {
    pub expected_count: usize,
    pub returned_count: usize,
    pub missing_titles: Vec<String>,
    pub duplicated_titles: Vec<String>,
    pub unexpected_titles: Vec<String>,
    pub numbering_contiguous: bool,
}

impl SequenceAudit {
    pub fn is_clean(&self) -> bool {
        self.expected_count == self.returned_count
            && self.missing_titles.is_empty()
            && self.duplicated_titles.is_empty()
            && self.unexpected_titles.is_empty()
            && self.numbering_contiguous
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.expected_count != self.returned_count {
            warnings.push(format!(
                "expected {} titled tracks, provider returned {}",
                self.expected_count, self.returned_count
            ));
        }
        if !self.missing_titles.is_empty() {
            warnings.push(format!("missing: {}", self.missing_titles.join(", ")));
        }
        if !self.duplicated_titles.is_empty() {
            warnings.push(format!("duplicated: {}", self.duplicated_titles.join(", ")));
        }
        if !self.unexpected_titles.is_empty() {
            warnings.push(format!("unexpected: {}", self.unexpected_titles.join(", ")));
        }
        if !self.numbering_contiguous {
            warnings.push("track numbers are not 1..n in order".to_string());
        }
        warnings
    }
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Compares titled input tracks against the returned sequence.
///
/// Blank input rows are ignored. Titles compare case-insensitively after
/// trimming.
pub fn audit_sequence(album: &AlbumData, result: &SequenceResult) -> SequenceAudit {
    let mut expected: BTreeMap<String, (String, usize)> = BTreeMap::new();
    for title in album.track_titles().filter(|title| !title.trim().is_empty()) {
        expected
            .entry(title_key(title))
            .or_insert_with(|| (title.trim().to_string(), 0))
            .1 += 1;
    }

    let mut returned: BTreeMap<String, (String, usize)> = BTreeMap::new();
    for track in &result.sequenced_tracks {
        returned
            .entry(title_key(&track.title))
            .or_insert_with(|| (track.title.trim().to_string(), 0))
            .1 += 1;
    }

    let missing_titles = expected
        .iter()
        .filter(|(key, _)| !returned.contains_key(*key))
        .map(|(_, (title, _))| title.clone())
        .collect();
    let unexpected_titles = returned
        .iter()
        .filter(|(key, _)| !expected.contains_key(*key))
        .map(|(_, (title, _))| title.clone())
        .collect();
    let duplicated_titles = returned
        .iter()
        .filter(|(key, (_, count))| {
            let allowed = expected.get(*key).map(|(_, n)| *n).unwrap_or(1);
            *count > allowed
        })
        .map(|(_, (title, _))| title.clone())
        .collect();
    let numbering_contiguous = result
        .sequenced_tracks
        .iter()
        .enumerate()
        .all(|(idx, track)| track.track_number as usize == idx + 1);

    SequenceAudit {
        expected_count: expected.values().map(|(_, n)| *n).sum(),
        returned_count: result.sequenced_tracks.len(),
        missing_titles,
        duplicated_titles,
        unexpected_titles,
        numbering_contiguous,
    }
}
