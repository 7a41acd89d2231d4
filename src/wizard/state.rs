use crate::album::{AlbumData, AlbumDraft};
use crate::config::DEFAULT_MAX_TRACK_COUNT;
use crate::provider::{audit_sequence, SequenceAudit, SequenceResult, SequencingError};
use crate::shared::AppLog;
use crate::tracks::{TrackList, TrackListError};
use crate::wizard::details::DetailsForm;
use crate::wizard::navigation::clamp_selection;
use serde_json::json;

/// The only failure text shown to the user; details go to the operator log.
pub const SEQUENCING_FAILED_MESSAGE: &str =
    "Failed to sequence album. Please check your API key or try again.";

const DETAILS_INVALID_FEEDBACK: &str = "Enter an album title and a track count to continue.";
const TRACKS_NOT_READY_FEEDBACK: &str = "Fill in at least two track titles to sequence.";

/// Lines moved by a single page scroll on the results step.
pub const RESULTS_PAGE_LINES: usize = 10;

/// Labels of the step indicator; processing and results share the last slot.
pub const STEP_LABELS: [&str; 3] = ["Details", "Tracks", "Sequence"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Details,
    Tracks,
    Processing,
    Results,
    Error,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Details => "details",
            WizardStep::Tracks => "tracks",
            WizardStep::Processing => "processing",
            WizardStep::Results => "results",
            WizardStep::Error => "error",
        }
    }

    pub fn step_number(self) -> usize {
        match self {
            WizardStep::Details => 1,
            WizardStep::Tracks => 2,
            WizardStep::Processing => 3,
            WizardStep::Results => 4,
            WizardStep::Error => 1,
        }
    }

    pub fn shows_step_indicator(self) -> bool {
        !matches!(self, WizardStep::Processing | WizardStep::Results)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    FocusPrev,
    FocusNext,
    Input(char),
    Backspace,
    Submit,
    Back,
    AddTrack,
    RemoveTrack,
    MoveTrackUp,
    MoveTrackDown,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Reset,
    Quit,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardAction::FocusPrev => "focus_prev",
            WizardAction::FocusNext => "focus_next",
            WizardAction::Input(_) => "input",
            WizardAction::Backspace => "backspace",
            WizardAction::Submit => "submit",
            WizardAction::Back => "back",
            WizardAction::AddTrack => "add_track",
            WizardAction::RemoveTrack => "remove_track",
            WizardAction::MoveTrackUp => "move_track_up",
            WizardAction::MoveTrackDown => "move_track_down",
            WizardAction::ScrollUp => "scroll_up",
            WizardAction::ScrollDown => "scroll_down",
            WizardAction::PageUp => "page_up",
            WizardAction::PageDown => "page_down",
            WizardAction::Reset => "reset",
            WizardAction::Quit => "quit",
        }
    }
}

impl std::fmt::Display for WizardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    None,
    OpenStep(WizardStep),
    /// The caller must run the request and report back via
    /// [`Wizard::complete_sequencing`].
    DispatchSequencing(AlbumData),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTransition {
    pub effect: WizardEffect,
    pub feedback: Option<String>,
}

impl WizardTransition {
    fn no_op(feedback: Option<String>) -> Self {
        Self {
            effect: WizardEffect::None,
            feedback,
        }
    }

    fn open(step: WizardStep) -> Self {
        Self {
            effect: WizardEffect::OpenStep(step),
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("invalid wizard transition: step={step} action={action}")]
    InvalidTransition {
        step: WizardStep,
        action: WizardAction,
    },
    #[error("no sequencing request is in flight (step={0})")]
    NotProcessing(WizardStep),
    #[error(transparent)]
    Track(#[from] TrackListError),
}

/// Step wizard owning every piece of session state.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    details: DetailsForm,
    draft: AlbumDraft,
    target_count: usize,
    tracks: TrackList,
    selected: usize,
    album: Option<AlbumData>,
    result: Option<SequenceResult>,
    audit: Option<SequenceAudit>,
    results_scroll: usize,
    error: Option<String>,
    max_track_count: usize,
    log: AppLog,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRACK_COUNT, AppLog::disabled())
    }
}

impl Wizard {
    pub fn new(max_track_count: usize, log: AppLog) -> Self {
        Self {
            step: WizardStep::Details,
            details: DetailsForm::default(),
            draft: AlbumDraft::default(),
            target_count: 0,
            tracks: TrackList::new(),
            selected: 0,
            album: None,
            result: None,
            audit: None,
            results_scroll: 0,
            error: None,
            max_track_count,
            log,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn details(&self) -> &DetailsForm {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut DetailsForm {
        &mut self.details
    }

    pub fn draft(&self) -> &AlbumDraft {
        &self.draft
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn max_track_count(&self) -> usize {
        self.max_track_count
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn album(&self) -> Option<&AlbumData> {
        self.album.as_ref()
    }

    pub fn result(&self) -> Option<&SequenceResult> {
        self.result.as_ref()
    }

    pub fn audit(&self) -> Option<&SequenceAudit> {
        self.audit.as_ref()
    }

    /// First visible line of the results view.
    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }

    /// Pulls the results offset back inside `0..=max` once the view knows
    /// how many lines it renders.
    pub fn clamp_results_scroll(&mut self, max: usize) {
        self.results_scroll = self.results_scroll.min(max);
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.tracks.is_ready()
    }

    pub fn set_track_title(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.require_step(WizardStep::Tracks, WizardAction::Input(' '))?;
        self.tracks.set_title(index, value)?;
        Ok(())
    }

    pub fn select_track(&mut self, index: usize) {
        self.selected = clamp_selection(index, self.tracks.len());
    }

    fn require_step(&self, step: WizardStep, action: WizardAction) -> Result<(), WizardError> {
        if self.step == step {
            return Ok(());
        }
        Err(WizardError::InvalidTransition {
            step: self.step,
            action,
        })
    }

    pub fn apply(&mut self, action: WizardAction) -> Result<WizardTransition, WizardError> {
        let invalid = WizardError::InvalidTransition {
            step: self.step,
            action,
        };
        match self.step {
            WizardStep::Details => match action {
                WizardAction::FocusPrev => {
                    self.details.focus = self.details.focus.prev();
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::FocusNext => {
                    self.details.focus = self.details.focus.next();
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::Input(ch) => {
                    self.details.push_char(ch);
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::Backspace => {
                    self.details.pop_char();
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::Submit => self.submit_details(),
                WizardAction::Quit => Ok(quit()),
                _ => Err(invalid),
            },
            WizardStep::Tracks => match action {
                WizardAction::FocusPrev => {
                    self.selected = self.selected.saturating_sub(1);
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::FocusNext => {
                    self.select_track(self.selected + 1);
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::Input(ch) => {
                    if !self.tracks.is_empty() {
                        self.tracks.push_title_char(self.selected, ch)?;
                    }
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::Backspace => {
                    if !self.tracks.is_empty() {
                        self.tracks.pop_title_char(self.selected)?;
                    }
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::AddTrack => {
                    self.selected = self.tracks.add();
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::RemoveTrack => {
                    if self.tracks.is_empty() {
                        return Ok(WizardTransition::no_op(Some(
                            "No track to remove.".to_string(),
                        )));
                    }
                    self.tracks.remove(self.selected)?;
                    self.selected = clamp_selection(self.selected, self.tracks.len());
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::MoveTrackUp => {
                    if self.tracks.move_up(self.selected) {
                        self.selected -= 1;
                    }
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::MoveTrackDown => {
                    if self.tracks.move_down(self.selected) {
                        self.selected += 1;
                    }
                    Ok(WizardTransition::no_op(None))
                }
                WizardAction::Back => self.back_to_details(),
                WizardAction::Submit => self.submit_tracks(),
                WizardAction::Quit => Ok(quit()),
                WizardAction::ScrollUp
                | WizardAction::ScrollDown
                | WizardAction::PageUp
                | WizardAction::PageDown
                | WizardAction::Reset => Err(invalid),
            },
            WizardStep::Processing => match action {
                WizardAction::Quit => Ok(quit()),
                _ => Err(invalid),
            },
            WizardStep::Results => match action {
                WizardAction::ScrollUp => Ok(self.scroll_results_up(1)),
                WizardAction::ScrollDown => Ok(self.scroll_results_down(1)),
                WizardAction::PageUp => Ok(self.scroll_results_up(RESULTS_PAGE_LINES)),
                WizardAction::PageDown => Ok(self.scroll_results_down(RESULTS_PAGE_LINES)),
                WizardAction::Reset => Ok(self.reset()),
                WizardAction::Quit => Ok(quit()),
                _ => Err(invalid),
            },
            WizardStep::Error => match action {
                WizardAction::Reset => Ok(self.reset()),
                WizardAction::Quit => Ok(quit()),
                _ => Err(invalid),
            },
        }
    }

    /// `Details -> Tracks` when the title is set and the count is positive.
    pub fn submit_details(&mut self) -> Result<WizardTransition, WizardError> {
        self.require_step(WizardStep::Details, WizardAction::Submit)?;
        let (draft, count) = match self.details.submission(self.max_track_count) {
            Ok(submission) => submission,
            Err(reason) => {
                let feedback = if self.details.can_submit() {
                    reason
                } else {
                    DETAILS_INVALID_FEEDBACK.to_string()
                };
                return Ok(WizardTransition::no_op(Some(feedback)));
            }
        };

        self.log.info(
            "wizard.details_submitted",
            "album details accepted",
            &[
                ("album_title", json!(draft.title)),
                ("target_count", json!(count)),
            ],
        );
        self.draft = draft;
        self.target_count = count;
        self.tracks.initialize(count);
        self.selected = 0;
        self.step = WizardStep::Tracks;
        Ok(WizardTransition::open(WizardStep::Tracks))
    }

    /// `Tracks -> Details`. The form keeps its values, the track rows do not.
    pub fn back_to_details(&mut self) -> Result<WizardTransition, WizardError> {
        self.require_step(WizardStep::Tracks, WizardAction::Back)?;
        self.tracks.clear();
        self.selected = 0;
        self.step = WizardStep::Details;
        Ok(WizardTransition::open(WizardStep::Details))
    }

    /// `Tracks -> Processing` once at least two rows carry a title.
    pub fn submit_tracks(&mut self) -> Result<WizardTransition, WizardError> {
        self.require_step(WizardStep::Tracks, WizardAction::Submit)?;
        if !self.tracks.is_ready() {
            return Ok(WizardTransition::no_op(Some(
                TRACKS_NOT_READY_FEEDBACK.to_string(),
            )));
        }

        let album = self.draft.finalize(self.tracks.to_vec());
        self.log.info(
            "wizard.sequence_dispatched",
            "album submitted for sequencing",
            &[
                ("album_title", json!(album.title)),
                ("track_count", json!(album.tracks.len())),
                ("titled_count", json!(self.tracks.ready_count())),
            ],
        );
        self.album = Some(album.clone());
        self.result = None;
        self.audit = None;
        self.error = None;
        self.step = WizardStep::Processing;
        Ok(WizardTransition {
            effect: WizardEffect::DispatchSequencing(album),
            feedback: None,
        })
    }

    /// Records the outcome of the in-flight request.
    pub fn complete_sequencing(
        &mut self,
        outcome: Result<SequenceResult, SequencingError>,
    ) -> Result<WizardTransition, WizardError> {
        if self.step != WizardStep::Processing {
            return Err(WizardError::NotProcessing(self.step));
        }

        match outcome {
            Ok(result) => {
                let audit = self
                    .album
                    .as_ref()
                    .map(|album| audit_sequence(album, &result));
                self.log.info(
                    "sequencing.succeeded",
                    "sequence received",
                    &[("sequenced_count", json!(result.sequenced_tracks.len()))],
                );
                if let Some(audit) = &audit {
                    for warning in audit.warnings() {
                        self.log.warn("sequencing.audit_warning", &warning, &[]);
                    }
                }
                self.result = Some(result);
                self.audit = audit;
                self.results_scroll = 0;
                self.step = WizardStep::Results;
                Ok(WizardTransition::open(WizardStep::Results))
            }
            Err(err) => {
                self.log.error(
                    "sequencing.failed",
                    &err.to_string(),
                    &[("kind", json!(err.kind()))],
                );
                self.error = Some(SEQUENCING_FAILED_MESSAGE.to_string());
                self.step = WizardStep::Error;
                Ok(WizardTransition::open(WizardStep::Error))
            }
        }
    }

    fn scroll_results_up(&mut self, lines: usize) -> WizardTransition {
        self.results_scroll = self.results_scroll.saturating_sub(lines);
        WizardTransition::no_op(None)
    }

    /// Unbounded here; the view clamps via [`Wizard::clamp_results_scroll`].
    fn scroll_results_down(&mut self, lines: usize) -> WizardTransition {
        self.results_scroll = self.results_scroll.saturating_add(lines);
        WizardTransition::no_op(None)
    }

    fn reset(&mut self) -> WizardTransition {
        self.log.info("wizard.reset", "wizard returned to details", &[]);
        let max_track_count = self.max_track_count;
        let log = self.log.clone();
        *self = Self::new(max_track_count, log);
        WizardTransition::open(WizardStep::Details)
    }
}

fn quit() -> WizardTransition {
    WizardTransition {
        effect: WizardEffect::Quit,
        feedback: None,
    }
}
