//! Render loop state machine.
//!
//! `Loading → Ready → (Draw ⇄ WaitEvent) → Closed`. Transitions live in
//! [`Phase::next`] so they can be checked without a terminal; [`Dashboard`]
//! drives them against a ratatui backend and an [`EventSource`].

use super::input::{map_event, EventSource, InputAction};
use super::layout::DisplayGrid;
use super::widgets::render_loading;
use crate::error::UiError;
use ratatui::{backend::Backend, layout::Rect, Terminal};
use tracing::debug;

/// Render loop phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Placeholder on screen, data being fetched
    Loading,
    /// Grid composed, nothing drawn yet
    Ready,
    /// Grid about to be drawn
    Draw,
    /// Blocked on the next terminal event
    WaitEvent,
    /// Quit requested
    Closed,
}

/// What moves the loop from one phase to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Loaded,
    Begin,
    Drawn,
    Input(InputAction),
}

impl Phase {
    /// Next phase; triggers that do not apply leave the phase unchanged
    pub fn next(self, trigger: Trigger) -> Phase {
        match (self, trigger) {
            (Phase::Loading, Trigger::Loaded) => Phase::Ready,
            (Phase::Ready, Trigger::Begin) => Phase::Draw,
            (Phase::Draw, Trigger::Drawn) => Phase::WaitEvent,
            (Phase::WaitEvent, Trigger::Input(InputAction::Quit)) => Phase::Closed,
            (Phase::WaitEvent, Trigger::Input(InputAction::Redraw)) => Phase::Draw,
            (phase, _) => phase,
        }
    }
}

fn render_error(e: impl std::fmt::Display) -> UiError {
    UiError::RenderError(e.to_string())
}

/// Owns the terminal and the event source for the lifetime of the UI
pub struct Dashboard<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    phase: Phase,
    grid_draws: usize,
}

impl<B: Backend, E: EventSource> Dashboard<B, E> {
    pub fn new(terminal: Terminal<B>, events: E) -> Self {
        Self {
            terminal,
            events,
            phase: Phase::Loading,
            grid_draws: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of times the grid has been drawn
    pub fn grid_draws(&self) -> usize {
        self.grid_draws
    }

    /// Current terminal size as a rectangle at the origin
    pub fn area(&self) -> Result<Rect, UiError> {
        let size = self.terminal.size().map_err(render_error)?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    /// Draw the loading placeholder over the whole screen
    pub fn show_loading(&mut self) -> Result<(), UiError> {
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                render_loading(frame, area);
            })
            .map_err(render_error)?;
        Ok(())
    }

    fn advance(&mut self, trigger: Trigger) {
        let next = self.phase.next(trigger);
        debug!(from = ?self.phase, to = ?next, ?trigger, "phase transition");
        self.phase = next;
    }

    /// Show `grid` and keep it on screen until a quit key arrives
    pub fn run(&mut self, grid: DisplayGrid) -> Result<(), UiError> {
        self.advance(Trigger::Loaded);
        self.terminal.clear().map_err(render_error)?;
        self.advance(Trigger::Begin);

        loop {
            match self.phase {
                Phase::Draw => {
                    self.terminal
                        .draw(|frame| grid.render(frame))
                        .map_err(render_error)?;
                    self.grid_draws += 1;
                    self.advance(Trigger::Drawn);
                }
                Phase::WaitEvent => {
                    let event = self
                        .events
                        .next_event()
                        .map_err(|e| UiError::InputError(e.to_string()))?;
                    self.advance(Trigger::Input(map_event(&event)));
                }
                Phase::Closed => return Ok(()),
                Phase::Loading | Phase::Ready => {
                    return Err(UiError::RenderError(format!(
                        "render loop entered in {:?} phase",
                        self.phase
                    )));
                }
            }
        }
    }

    #[cfg(test)]
    fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Snapshots;
    use crate::stats::AggregateSnapshot;
    use crate::ui::input::ScriptedEvents;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn ctrl_c() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
    }

    fn dashboard(events: Vec<Event>) -> Dashboard<TestBackend, ScriptedEvents> {
        let terminal = Terminal::new(TestBackend::new(160, 60)).unwrap();
        Dashboard::new(terminal, ScriptedEvents::new(events))
    }

    fn grid(area: Rect) -> DisplayGrid {
        let snapshots = Snapshots {
            aggregate: AggregateSnapshot {
                cases: 100,
                deaths: 5,
                recovered: 80,
                active: 15,
                ..Default::default()
            },
            entities: Vec::new(),
        };
        DisplayGrid::dashboard(area, &snapshots, "https://disease.sh/v3/covid-19")
    }

    fn screen<E: EventSource>(dashboard: &Dashboard<TestBackend, E>) -> String {
        dashboard
            .terminal()
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_transitions() {
        assert_eq!(Phase::Loading.next(Trigger::Loaded), Phase::Ready);
        assert_eq!(Phase::Ready.next(Trigger::Begin), Phase::Draw);
        assert_eq!(Phase::Draw.next(Trigger::Drawn), Phase::WaitEvent);
        assert_eq!(
            Phase::WaitEvent.next(Trigger::Input(InputAction::Redraw)),
            Phase::Draw
        );
        assert_eq!(
            Phase::WaitEvent.next(Trigger::Input(InputAction::Quit)),
            Phase::Closed
        );
    }

    #[test]
    fn test_inapplicable_triggers_keep_phase() {
        assert_eq!(Phase::Loading.next(Trigger::Drawn), Phase::Loading);
        assert_eq!(
            Phase::Draw.next(Trigger::Input(InputAction::Quit)),
            Phase::Draw
        );
        assert_eq!(Phase::Closed.next(Trigger::Begin), Phase::Closed);
        assert_eq!(
            Phase::Closed.next(Trigger::Input(InputAction::Redraw)),
            Phase::Closed
        );
    }

    #[test]
    fn test_loading_placeholder() {
        let mut dashboard = dashboard(Vec::new());
        dashboard.show_loading().unwrap();
        assert_eq!(dashboard.phase(), Phase::Loading);
        assert_eq!(dashboard.grid_draws(), 0);
        assert!(screen(&dashboard).contains("Please wait until information is loading"));
    }

    #[test]
    fn test_each_quit_alias_closes_without_redraw() {
        for quit in [key(KeyCode::Char('q')), key(KeyCode::Esc), ctrl_c()] {
            let mut dashboard = dashboard(vec![quit, key(KeyCode::Char('x'))]);
            let area = dashboard.area().unwrap();
            dashboard.run(grid(area)).unwrap();
            assert_eq!(dashboard.phase(), Phase::Closed);
            assert_eq!(dashboard.grid_draws(), 1);
            assert_eq!(dashboard.events.remaining(), 1);
        }
    }

    #[test]
    fn test_other_events_redraw_once_each() {
        let events = vec![
            key(KeyCode::Char('x')),
            Event::Resize(80, 20),
            key(KeyCode::Down),
            key(KeyCode::Char('q')),
        ];
        let mut dashboard = dashboard(events);
        let area = dashboard.area().unwrap();
        dashboard.run(grid(area)).unwrap();
        assert_eq!(dashboard.grid_draws(), 4);
        assert_eq!(dashboard.events.remaining(), 0);
    }

    #[test]
    fn test_grid_replaces_placeholder() {
        let mut dashboard = dashboard(vec![key(KeyCode::Char('q'))]);
        dashboard.show_loading().unwrap();
        let area = dashboard.area().unwrap();
        assert_eq!(area, Rect::new(0, 0, 160, 60));
        dashboard.run(grid(area)).unwrap();

        let screen = screen(&dashboard);
        assert!(!screen.contains("Please wait"));
        assert!(screen.contains("Mortality rate (CFR): 5.88%"));
    }

    #[test]
    fn test_event_source_failure_is_an_input_error() {
        let mut dashboard = dashboard(vec![key(KeyCode::Enter)]);
        let area = dashboard.area().unwrap();
        let err = dashboard.run(grid(area)).unwrap_err();
        assert!(matches!(err, UiError::InputError(_)));
        assert_eq!(dashboard.grid_draws(), 2);
    }
}
