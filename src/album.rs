use crate::tracks::Track;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARTIST: &str = "Unknown Artist";
pub const DEFAULT_ALBUM_TITLE: &str = "Untitled Album";
pub const DEFAULT_GENRE: &str = "Unspecified";

/// Album metadata as typed on the details step, before defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumDraft {
    pub artist: String,
    pub title: String,
    pub genre: String,
}

impl AlbumDraft {
    /// Builds the submitted album, substituting defaults for blank fields.
    pub fn finalize(&self, tracks: Vec<Track>) -> AlbumData {
        AlbumData {
            artist: or_default(&self.artist, DEFAULT_ARTIST),
            title: or_default(&self.title, DEFAULT_ALBUM_TITLE),
            genre: or_default(&self.genre, DEFAULT_GENRE),
            tracks,
        }
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumData {
    pub artist: String,
    pub title: String,
    pub genre: String,
    pub tracks: Vec<Track>,
}

impl AlbumData {
    pub fn track_titles(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|track| track.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::TrackList;

    #[test]
    fn finalize_substitutes_defaults_for_blank_fields() {
        let draft = AlbumDraft {
            artist: "  ".to_string(),
            title: "Endless Summer".to_string(),
            genre: String::new(),
        };
        let album = draft.finalize(TrackList::from_titles(["Sundown", "Drive"]).to_vec());
        assert_eq!(album.artist, DEFAULT_ARTIST);
        assert_eq!(album.title, "Endless Summer");
        assert_eq!(album.genre, DEFAULT_GENRE);
        assert_eq!(album.track_titles().collect::<Vec<_>>(), ["Sundown", "Drive"]);
    }

    #[test]
    fn finalize_keeps_provided_values_verbatim() {
        let draft = AlbumDraft {
            artist: "The Midnight".to_string(),
            title: String::new(),
            genre: "Synthwave".to_string(),
        };
        let album = draft.finalize(Vec::new());
        assert_eq!(album.artist, "The Midnight");
        assert_eq!(album.title, DEFAULT_ALBUM_TITLE);
        assert_eq!(album.genre, "Synthwave");
    }
}
