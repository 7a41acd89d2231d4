use crate::shared::TrackId;
use serde::{Deserialize, Serialize};

/// Minimum number of titled tracks before a list may be submitted.
pub const READY_TRACK_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// Creation order. Informational only: never renumbered on reorder or delete.
    pub original_index: usize,
}

impl Track {
    fn blank(original_index: usize) -> Self {
        Self {
            id: TrackId::generate(),
            title: String::new(),
            original_index,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackListError {
    #[error("track index {index} is out of range for a list of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered, user-editable list of track rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for title in titles {
            let index = list.add();
            list.tracks[index].title = title.into();
        }
        list
    }

    /// Seeds `count` blank rows. Does nothing when the list already has rows.
    ///
    /// Returns whether rows were created.
    pub fn initialize(&mut self, count: usize) -> bool {
        if !self.tracks.is_empty() {
            return false;
        }
        self.tracks = (0..count).map(Track::blank).collect();
        true
    }

    pub fn set_title(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), TrackListError> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .get_mut(index)
            .ok_or(TrackListError::IndexOutOfRange { index, len })?;
        track.title = value.into();
        Ok(())
    }

    pub fn push_title_char(&mut self, index: usize, ch: char) -> Result<(), TrackListError> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .get_mut(index)
            .ok_or(TrackListError::IndexOutOfRange { index, len })?;
        track.title.push(ch);
        Ok(())
    }

    pub fn pop_title_char(&mut self, index: usize) -> Result<(), TrackListError> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .get_mut(index)
            .ok_or(TrackListError::IndexOutOfRange { index, len })?;
        track.title.pop();
        Ok(())
    }

    /// Swaps the track at `index` with its predecessor. No-op at the top.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.tracks.len() {
            return false;
        }
        self.tracks.swap(index, index - 1);
        true
    }

    /// Swaps the track at `index` with its successor. No-op at the bottom.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.tracks.len() {
            return false;
        }
        self.tracks.swap(index, index + 1);
        true
    }

    /// Appends a blank row and returns its index.
    pub fn add(&mut self) -> usize {
        let index = self.tracks.len();
        self.tracks.push(Track::blank(index));
        index
    }

    pub fn remove(&mut self, index: usize) -> Result<Track, TrackListError> {
        if index >= self.tracks.len() {
            return Err(TrackListError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(self.tracks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn ready_count(&self) -> usize {
        self.tracks.iter().filter(|track| track.has_title()).count()
    }

    pub fn is_ready(&self) -> bool {
        self.ready_count() >= READY_TRACK_THRESHOLD
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.clone()
    }
}
