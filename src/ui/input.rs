//! Input handling for the TUI.
//!
//! This module reads terminal events and translates them into dashboard
//! actions. Reading blocks until an event arrives.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
#[cfg(test)]
use std::collections::VecDeque;
use std::io;

/// Actions that can be performed based on user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit the application
    Quit,
    /// Draw the dashboard again
    Redraw,
}

/// Blocking stream of terminal events
pub trait EventSource {
    /// Wait for the next event, without timeout
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Events from the real terminal
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Pre-recorded events, replayed in order. Running out is an error.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<Event>,
}

#[cfg(test)]
impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted events"))
    }
}

/// Map a terminal event to a dashboard action
pub fn map_event(event: &Event) -> InputAction {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            map_key_to_action(*key_event)
        }
        _ => InputAction::Redraw,
    }
}

/// Map a key event to a dashboard action
fn map_key_to_action(key_event: KeyEvent) -> InputAction {
    match key_event.code {
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c' | 'C') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }
        _ => InputAction::Redraw,
    }
}
