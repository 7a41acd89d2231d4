use crate::album::AlbumDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsField {
    Artist,
    Title,
    Genre,
    TrackCount,
}

pub const ALL_DETAILS_FIELDS: [DetailsField; 4] = [
    DetailsField::Artist,
    DetailsField::Title,
    DetailsField::Genre,
    DetailsField::TrackCount,
];

impl DetailsField {
    pub fn label(self) -> &'static str {
        match self {
            DetailsField::Artist => "Artist",
            DetailsField::Title => "Album Title",
            DetailsField::Genre => "Genre",
            DetailsField::TrackCount => "Track Count",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            DetailsField::Artist => "e.g. The Midnight",
            DetailsField::Title => "e.g. Endless Summer",
            DetailsField::Genre => "e.g. Synthwave",
            DetailsField::TrackCount => "e.g. 12",
        }
    }

    fn index(self) -> usize {
        match self {
            DetailsField::Artist => 0,
            DetailsField::Title => 1,
            DetailsField::Genre => 2,
            DetailsField::TrackCount => 3,
        }
    }

    pub fn next(self) -> Self {
        ALL_DETAILS_FIELDS[(self.index() + 1) % ALL_DETAILS_FIELDS.len()]
    }

    pub fn prev(self) -> Self {
        let len = ALL_DETAILS_FIELDS.len();
        ALL_DETAILS_FIELDS[(self.index() + len - 1) % len]
    }
}

/// Raw text of the details step, one buffer per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsForm {
    pub artist: String,
    pub title: String,
    pub genre: String,
    pub track_count: String,
    pub focus: DetailsField,
}

impl Default for DetailsForm {
    fn default() -> Self {
        Self {
            artist: String::new(),
            title: String::new(),
            genre: String::new(),
            track_count: String::new(),
            focus: DetailsField::Artist,
        }
    }
}

impl DetailsForm {
    pub fn value(&self, field: DetailsField) -> &str {
        match field {
            DetailsField::Artist => &self.artist,
            DetailsField::Title => &self.title,
            DetailsField::Genre => &self.genre,
            DetailsField::TrackCount => &self.track_count,
        }
    }

    fn value_mut(&mut self, field: DetailsField) -> &mut String {
        match field {
            DetailsField::Artist => &mut self.artist,
            DetailsField::Title => &mut self.title,
            DetailsField::Genre => &mut self.genre,
            DetailsField::TrackCount => &mut self.track_count,
        }
    }

    /// Appends to the focused field. The count field only takes digits.
    pub fn push_char(&mut self, ch: char) -> bool {
        if self.focus == DetailsField::TrackCount && !ch.is_ascii_digit() {
            return false;
        }
        let focus = self.focus;
        self.value_mut(focus).push(ch);
        true
    }

    pub fn pop_char(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    /// Whether the continue action should be offered at all.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.track_count.trim().is_empty()
    }

    /// Validates the form into album metadata plus the requested slot count.
    pub fn submission(&self, max_track_count: usize) -> Result<(AlbumDraft, usize), String> {
        if self.title.trim().is_empty() {
            return Err("Album title is required.".to_string());
        }
        let count = self
            .track_count
            .trim()
            .parse::<usize>()
            .map_err(|_| "Track count must be a whole number.".to_string())?;
        if count == 0 {
            return Err("Track count must be greater than zero.".to_string());
        }
        if count > max_track_count {
            return Err(format!("Track count must be at most {max_track_count}."));
        }
        Ok((
            AlbumDraft {
                artist: self.artist.clone(),
                title: self.title.clone(),
                genre: self.genre.clone(),
            },
            count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_in_both_directions() {
        assert_eq!(DetailsField::TrackCount.next(), DetailsField::Artist);
        assert_eq!(DetailsField::Artist.prev(), DetailsField::TrackCount);
    }

    #[test]
    fn count_field_rejects_non_digits() {
        let mut form = DetailsForm {
            focus: DetailsField::TrackCount,
            ..DetailsForm::default()
        };
        assert!(!form.push_char('x'));
        assert!(form.push_char('7'));
        assert_eq!(form.track_count, "7");
    }

    #[test]
    fn submission_enforces_title_and_count_bounds() {
        let mut form = DetailsForm {
            track_count: "5".to_string(),
            ..DetailsForm::default()
        };
        assert!(form.submission(30).is_err());

        form.title = "Endless Summer".to_string();
        let (draft, count) = form.submission(30).expect("valid");
        assert_eq!(draft.title, "Endless Summer");
        assert_eq!(count, 5);

        form.track_count = "0".to_string();
        assert!(form.submission(30).is_err());
        form.track_count = "31".to_string();
        assert!(form.submission(30).is_err());
    }
}
