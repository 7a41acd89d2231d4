use crate::config::CredentialStatus;
use crate::provider::{SequenceResult, Sequencer, SequencingError};
use crate::wizard::{
    hint_text, wizard_action_from_key, DetailsField, Wizard, WizardEffect, WizardStep,
    ALL_DETAILS_FIELDS, STEP_LABELS,
};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub(crate) const PROCESSING_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);

type SequencingOutcome = Result<SequenceResult, SequencingError>;

/// Everything drawn around the wizard body that is not wizard state.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub credential: CredentialStatus,
    pub spinner: &'a str,
    pub status_text: Option<&'a str>,
}

/// Layout facts the event loop feeds back into wizard state after a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewMetrics {
    pub results_max_scroll: usize,
}

struct TuiState {
    status_text: Option<String>,
    processing: Option<Receiver<SequencingOutcome>>,
    spinner_index: usize,
    last_spinner_tick: Instant,
}

impl TuiState {
    fn new() -> Self {
        Self {
            status_text: None,
            processing: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
        }
    }

    fn spinner_frame(&self) -> &'static str {
        PROCESSING_FRAMES[self.spinner_index % PROCESSING_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.processing.is_some() && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % PROCESSING_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }
}

pub fn run_wizard_tui(
    wizard: &mut Wizard,
    sequencer: Arc<dyn Sequencer>,
    credential: CredentialStatus,
) -> Result<(), String> {
    let mut terminal = setup_terminal()?;
    let mut state = TuiState::new();

    let result = run_event_loop(&mut terminal, wizard, &sequencer, credential, &mut state);
    let teardown = teardown_terminal(&mut terminal);

    finish_session(result, teardown)
}

/// The event-loop error wins over a teardown error.
fn finish_session(
    result: Result<(), String>,
    teardown: Result<(), String>,
) -> Result<(), String> {
    result.and(teardown)
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    wizard: &mut Wizard,
    sequencer: &Arc<dyn Sequencer>,
    credential: CredentialStatus,
    state: &mut TuiState,
) -> Result<(), String> {
    loop {
        state.advance_spinner_if_needed();
        check_processing_result(wizard, state)?;

        let chrome = Chrome {
            credential,
            spinner: state.spinner_frame(),
            status_text: state.status_text.as_deref(),
        };
        let mut metrics = ViewMetrics::default();
        terminal
            .draw(|frame| metrics = draw_wizard(frame, wizard, &chrome))
            .map_err(|e| format!("failed to render wizard: {e}"))?;
        wizard.clamp_results_scroll(metrics.results_max_scroll);

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(|e| format!("failed to read event: {e}"))?
        else {
            continue;
        };
        let Some(action) = wizard_action_from_key(wizard.step(), key) else {
            continue;
        };

        let transition = match wizard.apply(action) {
            Ok(transition) => transition,
            Err(err) => {
                state.status_text = Some(err.to_string());
                continue;
            }
        };
        state.status_text = transition.feedback;

        match transition.effect {
            WizardEffect::None | WizardEffect::OpenStep(_) => {}
            WizardEffect::DispatchSequencing(album) => {
                let worker = Arc::clone(sequencer);
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || {
                    let _ = tx.send(worker.sequence(&album));
                });
                state.processing = Some(rx);
                state.spinner_index = 0;
                state.last_spinner_tick = Instant::now();
            }
            WizardEffect::Quit => break,
        }
    }

    Ok(())
}

fn check_processing_result(wizard: &mut Wizard, state: &mut TuiState) -> Result<(), String> {
    let Some(rx) = state.processing.take() else {
        return Ok(());
    };

    let outcome = match rx.try_recv() {
        Ok(outcome) => outcome,
        Err(mpsc::TryRecvError::Empty) => {
            state.processing = Some(rx);
            return Ok(());
        }
        Err(mpsc::TryRecvError::Disconnected) => Err(SequencingError::Provider(
            "sequencing worker exited without a result".to_string(),
        )),
    };

    let transition = wizard
        .complete_sequencing(outcome)
        .map_err(|e| e.to_string())?;
    state.status_text = transition.feedback;
    Ok(())
}

pub fn draw_wizard(frame: &mut Frame<'_>, wizard: &Wizard, chrome: &Chrome<'_>) -> ViewMetrics {
    let step = wizard.step();
    let indicator_height = if step.shows_step_indicator() { 3 } else { 0 };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(indicator_height),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, sections[0], chrome.credential);
    if step.shows_step_indicator() {
        draw_step_indicator(frame, sections[1], step.step_number());
    }
    let mut metrics = ViewMetrics::default();
    match step {
        WizardStep::Details => draw_details(frame, sections[2], wizard),
        WizardStep::Tracks => draw_tracks(frame, sections[2], wizard),
        WizardStep::Processing => draw_processing(frame, sections[2], wizard, chrome.spinner),
        WizardStep::Results => {
            metrics.results_max_scroll = draw_results(frame, sections[2], wizard);
        }
        WizardStep::Error => draw_error(frame, sections[2], wizard),
    }

    let status = chrome.status_text.unwrap_or_else(|| hint_text(step));
    let status_widget = Paragraph::new(status.to_string())
        .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(status_widget, sections[3]);
    metrics
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, credential: CredentialStatus) {
    let badge_style = match credential {
        CredentialStatus::Present => Style::default().fg(Color::Green),
        CredentialStatus::Missing => Style::default().fg(Color::Red),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "SONIC",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("SEQUENCE", Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(format!("● {}", credential.label()), badge_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn draw_step_indicator(frame: &mut Frame<'_>, area: Rect, current: usize) {
    let mut spans = Vec::new();
    for (idx, label) in STEP_LABELS.iter().enumerate() {
        let number = idx + 1;
        if idx > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if number < current {
            ("✓".to_string(), Style::default().fg(Color::Gray))
        } else if number == current {
            (
                number.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (number.to_string(), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("({marker}) {label}"), style));
    }
    let indicator = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(indicator, area);
}

fn draw_details(frame: &mut Frame<'_>, area: Rect, wizard: &Wizard) {
    let form = wizard.details();
    let mut lines = vec![
        Line::styled("Define album parameters.", Style::default().fg(Color::Gray)),
        Line::raw(""),
    ];
    for field in ALL_DETAILS_FIELDS {
        let focused = form.focus == field;
        let value = form.value(field);
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value_span = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.to_string())
        };
        let mut spans = vec![
            Span::styled(format!("{:<12}", field.label()), label_style),
            value_span,
        ];
        if focused {
            spans.push(Span::raw("█"));
        }
        if field == DetailsField::TrackCount {
            spans.push(Span::styled(
                format!("  (1-{})", wizard.max_track_count()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(action_line("Continue [Enter]", form.can_submit()));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title("Project Setup")
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, area);
}

fn draw_tracks(frame: &mut Frame<'_>, area: Rect, wizard: &Wizard) {
    let tracks = wizard.tracks();
    let filled = tracks.ready_count();
    let counter_style = if filled == tracks.len() && !tracks.is_empty() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![Line::styled(
        "Input tracks in any order.",
        Style::default().fg(Color::Gray),
    )];
    for (idx, track) in tracks.as_slice().iter().enumerate() {
        let selected = idx == wizard.selected();
        let number_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if track.title.is_empty() {
            Span::styled("Track Title", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(track.title.clone())
        };
        let mut spans = vec![
            Span::styled(if selected { "> " } else { "  " }, number_style),
            Span::styled(format!("{:02}  ", idx + 1), number_style),
            title,
        ];
        if selected {
            spans.push(Span::raw("█"));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::styled(
        "+ Add Track [Ctrl+N]",
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::raw(""));
    lines.push(action_line("Process Sequence [Enter]", wizard.is_ready()));

    let title = Line::from(vec![
        Span::raw("Track Inventory "),
        Span::styled(format!("{filled}/{}", tracks.len()), counter_style),
    ]);
    let widget = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .scroll((scroll_offset(wizard.selected(), area.height), 0));
    frame.render_widget(widget, area);
}

/// Keeps the selected row visible inside a bordered block of `height` rows.
fn scroll_offset(selected: usize, height: u16) -> u16 {
    let visible = usize::from(height.saturating_sub(2));
    if visible == 0 {
        return 0;
    }
    let row = selected + 1;
    u16::try_from(row.saturating_sub(visible.saturating_sub(1))).unwrap_or(u16::MAX)
}

fn draw_processing(frame: &mut Frame<'_>, area: Rect, wizard: &Wizard, spinner: &str) {
    let title = wizard
        .album()
        .map(|album| album.title.as_str())
        .unwrap_or_default();
    let lines = vec![
        Line::raw(""),
        Line::styled(
            format!("{spinner}  Analyzing Structure"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            format!(
                "Processing metadata, calculating optimal flow, and structuring the narrative arc for \"{title}\"."
            ),
            Style::default().fg(Color::Gray),
        ),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
    frame.render_widget(widget, area);
}

/// Renders the result with the wizard's scroll offset and returns the largest
/// usable offset for the current area.
fn draw_results(frame: &mut Frame<'_>, area: Rect, wizard: &Wizard) -> usize {
    let Some(result) = wizard.result() else {
        return 0;
    };
    let width = usize::from(area.width.saturating_sub(2));
    let height = usize::from(area.height.saturating_sub(2));
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    if let Some(album) = wizard.album() {
        push_wrapped(
            &mut lines,
            &format!("{} - {} ({})", album.artist, album.title, album.genre),
            "",
            width,
            bold.fg(Color::White),
        );
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled("Album Analysis", heading));
    push_wrapped(&mut lines, &result.album_analysis, "", width, Style::default());
    lines.push(Line::raw(""));
    lines.push(Line::styled("Narrative Arc", heading));
    push_wrapped(&mut lines, &result.narrative_arc, "", width, Style::default());
    lines.push(Line::raw(""));
    lines.push(Line::styled("Sequence", heading));
    for track in &result.sequenced_tracks {
        push_wrapped(
            &mut lines,
            &format!("{:02}. {}", track.track_number, track.title),
            "",
            width,
            bold,
        );
        push_wrapped(
            &mut lines,
            &track.reasoning,
            "    ",
            width,
            Style::default().fg(Color::Gray),
        );
        if let Some(note) = &track.transition_note {
            push_wrapped(
                &mut lines,
                &format!("-> {note}"),
                "    ",
                width,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
    if let Some(audit) = wizard.audit() {
        let warnings = audit.warnings();
        if !warnings.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "Sequence check",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            for warning in warnings {
                push_wrapped(
                    &mut lines,
                    &format!("! {warning}"),
                    "  ",
                    width,
                    Style::default().fg(Color::Yellow),
                );
            }
        }
    }

    let max_scroll = lines.len().saturating_sub(height);
    let offset = wizard.results_scroll().min(max_scroll);
    let title = if max_scroll > 0 {
        format!(
            "Results {}-{} of {}",
            offset + 1,
            (offset + height).min(lines.len()),
            lines.len()
        )
    } else {
        "Results".to_string()
    };
    let widget = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(widget, area);
    max_scroll
}

/// Word-wraps `text` to `width` columns, prefixing every row with `indent`.
/// Words wider than a row are split.
fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    indent: &str,
    width: usize,
    style: Style,
) {
    let room = width.saturating_sub(indent.chars().count()).max(1);
    let mut row = String::new();
    let mut row_len = 0;
    let mut emitted = false;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let gap = usize::from(row_len > 0);
            if row_len + gap + word.len() <= room {
                if gap == 1 {
                    row.push(' ');
                }
                row.extend(word.iter());
                row_len += gap + word.len();
                break;
            }
            if row_len > 0 {
                lines.push(Line::styled(format!("{indent}{row}"), style));
                emitted = true;
                row.clear();
                row_len = 0;
                continue;
            }
            let rest = word.split_off(room);
            lines.push(Line::styled(
                format!("{indent}{}", word.iter().collect::<String>()),
                style,
            ));
            emitted = true;
            word = rest;
        }
    }
    if row_len > 0 || !emitted {
        lines.push(Line::styled(format!("{indent}{row}"), style));
    }
}

fn draw_error(frame: &mut Frame<'_>, area: Rect, wizard: &Wizard) {
    let lines = vec![
        Line::styled(
            "Processing Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(wizard.error_message().unwrap_or_default().to_string()),
        Line::raw(""),
        action_line("Try Again [Enter]", true),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(widget, area);
}

fn action_line(label: &str, enabled: bool) -> Line<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::styled(format!(" {label} "), style)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to initialize terminal: {e}"))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}
