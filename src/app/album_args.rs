use crate::album::{AlbumData, AlbumDraft};
use crate::tracks::{TrackList, READY_TRACK_THRESHOLD};

/// Album metadata and track titles collected from `--flag value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumArgs {
    pub artist: String,
    pub title: String,
    pub genre: String,
    pub tracks: Vec<String>,
}

impl AlbumArgs {
    /// Applies the same gates as the wizard: a title, enough titled tracks and
    /// the configured upper bound on slots.
    pub fn into_album(self, max_track_count: usize) -> Result<AlbumData, String> {
        if self.title.trim().is_empty() {
            return Err("--title is required".to_string());
        }
        if self.tracks.len() > max_track_count {
            return Err(format!(
                "at most {max_track_count} tracks are accepted (got {})",
                self.tracks.len()
            ));
        }
        let tracks = TrackList::from_titles(self.tracks);
        if !tracks.is_ready() {
            return Err(format!(
                "at least {READY_TRACK_THRESHOLD} non-empty --track values are required"
            ));
        }
        let draft = AlbumDraft {
            artist: self.artist,
            title: self.title,
            genre: self.genre,
        };
        Ok(draft.finalize(tracks.to_vec()))
    }
}

pub fn parse_album_args(args: &[String]) -> Result<AlbumArgs, String> {
    let mut parsed = AlbumArgs::default();
    let mut index = 0usize;
    while index < args.len() {
        let flag = args[index].as_str();
        let slot = match flag {
            "--artist" => &mut parsed.artist,
            "--title" => &mut parsed.title,
            "--genre" => &mut parsed.genre,
            "--track" => {
                index += 1;
                let value = args
                    .get(index)
                    .ok_or_else(|| "--track requires a value".to_string())?;
                parsed.tracks.push(value.clone());
                index += 1;
                continue;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option `{other}`"));
            }
            other => {
                return Err(format!("unexpected positional argument `{other}`"));
            }
        };
        index += 1;
        let value = args
            .get(index)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        *slot = value.clone();
        index += 1;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_collect_repeated_tracks_in_order() {
        let parsed = parse_album_args(&args(&[
            "--title", "Endless Summer", "--track", "Sundown", "--track", "Drive",
        ]))
        .expect("parse");
        assert_eq!(parsed.title, "Endless Summer");
        assert_eq!(parsed.tracks, vec!["Sundown", "Drive"]);
        assert!(parsed.artist.is_empty());
    }

    #[test]
    fn missing_value_and_unknown_flag_are_rejected() {
        let err = parse_album_args(&args(&["--title"])).expect_err("missing value");
        assert!(err.contains("--title requires a value"));
        let err = parse_album_args(&args(&["--mood", "calm"])).expect_err("unknown");
        assert!(err.contains("unknown option `--mood`"));
    }

    #[test]
    fn into_album_applies_defaults_and_ready_gate() {
        let parsed = parse_album_args(&args(&[
            "--title", "Endless Summer", "--track", "Sundown", "--track", "",
        ]))
        .expect("parse");
        assert!(parsed.clone().into_album(30).is_err());

        let mut ready = parsed;
        ready.tracks.push("Drive".to_string());
        let album = ready.into_album(30).expect("album");
        assert_eq!(album.artist, "Unknown Artist");
        assert_eq!(album.genre, "Unspecified");
        assert_eq!(album.tracks.len(), 3);
    }
}
