use crate::album::{AlbumData, DEFAULT_GENRE};

/// Renders the sequencing instruction sent to the model.
///
/// Titles are listed in the order they currently appear in the track list,
/// including rows left blank.
pub fn build_sequencing_prompt(album: &AlbumData) -> String {
    let genre = if album.genre.trim().is_empty() {
        DEFAULT_GENRE
    } else {
        album.genre.as_str()
    };
    let track_lines = album
        .track_titles()
        .map(|title| format!("- {title}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Act as a world-class music producer and mastering engineer.\n\
I have an album that needs sequencing. I will provide the artist, title, genre, and a list of unordered track titles.\n\
\n\
Your goal is to create the perfect tracklist order (sequence) to maximize emotional impact, flow, and listener retention.\n\
Infer the likely mood, tempo, and energy of the songs based on their titles and the genre.\n\
\n\
Album Details:\n\
Artist: {artist}\n\
Title: {title}\n\
Genre: {genre}\n\
\n\
Unordered Tracks:\n\
{track_lines}\n\
\n\
Please reorder these tracks into a cohesive album structure. Consider standard sequencing techniques (e.g., strong opener, varying energy levels, emotional climax, resolution).\n",
        artist = album.artist,
        title = album.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::album::AlbumDraft;
    use crate::tracks::TrackList;

    #[test]
    fn blank_genre_falls_back_to_unspecified() {
        let mut album = AlbumDraft {
            artist: "A".to_string(),
            title: "T".to_string(),
            genre: "Ambient".to_string(),
        }
        .finalize(TrackList::from_titles(["One", "Two"]).to_vec());
        album.genre = String::new();
        let prompt = build_sequencing_prompt(&album);
        assert!(prompt.contains("Genre: Unspecified\n"), "{prompt}");
    }
}
