//! Conversational planning sessions.
//!
//! A session walks a user through sharing a start location, picking a
//! mood and choosing kinds of places, then holds the planned tour until
//! they ask for another one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Coordinate, Mood, PlaceKind, Tour};
use crate::planner::TourRequest;

/// Where a session is in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitingLocation,
    AwaitingMood,
    SelectingKinds,
    ShowingRoute,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AwaitingLocation => "awaiting_location",
            Stage::AwaitingMood => "awaiting_mood",
            Stage::SelectingKinds => "selecting_kinds",
            Stage::ShowingRoute => "showing_route",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from session transitions. The session is unchanged when one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while {stage}")]
    UnexpectedStage { action: &'static str, stage: Stage },

    #[error("select at least one kind of place")]
    NoKindsSelected,
}

/// Stage plus the data collected so far.
#[derive(Debug, Clone)]
enum State {
    AwaitingLocation,
    AwaitingMood {
        location: Coordinate,
    },
    SelectingKinds {
        location: Coordinate,
        mood: Mood,
        kinds: Vec<PlaceKind>,
    },
    ShowingRoute {
        location: Coordinate,
        mood: Mood,
        kinds: Vec<PlaceKind>,
        tour: Box<Tour>,
    },
}

/// One user's planning conversation.
#[derive(Debug, Clone)]
pub struct Session {
    state: State,
    last_activity: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: State::AwaitingLocation,
            last_activity: Utc::now(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self.state {
            State::AwaitingLocation => Stage::AwaitingLocation,
            State::AwaitingMood { .. } => Stage::AwaitingMood,
            State::SelectingKinds { .. } => Stage::SelectingKinds,
            State::ShowingRoute { .. } => Stage::ShowingRoute,
        }
    }

    pub fn location(&self) -> Option<Coordinate> {
        match &self.state {
            State::AwaitingLocation => None,
            State::AwaitingMood { location }
            | State::SelectingKinds { location, .. }
            | State::ShowingRoute { location, .. } => Some(*location),
        }
    }

    pub fn mood(&self) -> Option<Mood> {
        match &self.state {
            State::SelectingKinds { mood, .. } | State::ShowingRoute { mood, .. } => Some(*mood),
            _ => None,
        }
    }

    /// Selected kinds, in the order they were picked.
    pub fn kinds(&self) -> &[PlaceKind] {
        match &self.state {
            State::SelectingKinds { kinds, .. } | State::ShowingRoute { kinds, .. } => {
                kinds.as_slice()
            }
            _ => &[],
        }
    }

    pub fn is_selected(&self, kind: PlaceKind) -> bool {
        self.kinds().contains(&kind)
    }

    pub fn tour(&self) -> Option<&Tour> {
        match &self.state {
            State::ShowingRoute { tour, .. } => Some(&**tour),
            _ => None,
        }
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    fn unexpected(&self, action: &'static str) -> SessionError {
        SessionError::UnexpectedStage {
            action,
            stage: self.stage(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Record the start location and move on to asking for a mood.
    pub fn share_location(&mut self, location: Coordinate) -> Result<(), SessionError> {
        match self.state {
            State::AwaitingLocation => {
                self.state = State::AwaitingMood { location };
                self.touch();
                Ok(())
            }
            _ => Err(self.unexpected("share a location")),
        }
    }

    /// Record the mood and start kind selection with nothing selected.
    pub fn choose_mood(&mut self, mood: Mood) -> Result<(), SessionError> {
        match self.state {
            State::AwaitingMood { location } => {
                self.state = State::SelectingKinds {
                    location,
                    mood,
                    kinds: Vec::new(),
                };
                self.touch();
                Ok(())
            }
            _ => Err(self.unexpected("choose a mood")),
        }
    }

    /// Select `kind` if it is not selected, otherwise deselect it.
    ///
    /// Returns whether the kind is selected afterwards.
    pub fn toggle_kind(&mut self, kind: PlaceKind) -> Result<bool, SessionError> {
        let selected = match &mut self.state {
            State::SelectingKinds { kinds, .. } => match kinds.iter().position(|&k| k == kind) {
                Some(index) => {
                    kinds.remove(index);
                    false
                }
                None => {
                    kinds.push(kind);
                    true
                }
            },
            _ => return Err(self.unexpected("change kinds")),
        };
        self.touch();
        Ok(selected)
    }

    /// The tour request for the current selection.
    pub fn build_request(&self) -> Result<TourRequest, SessionError> {
        match &self.state {
            State::SelectingKinds { kinds, .. } if kinds.is_empty() => {
                Err(SessionError::NoKindsSelected)
            }
            State::SelectingKinds {
                location,
                mood,
                kinds,
            } => Ok(TourRequest::new(*location, *mood, kinds.iter().copied())),
            _ => Err(self.unexpected("build a tour")),
        }
    }

    /// Hold the planned tour for display.
    pub fn show_tour(&mut self, tour: Tour) -> Result<(), SessionError> {
        match &mut self.state {
            State::SelectingKinds {
                location,
                mood,
                kinds,
            } => {
                let next = State::ShowingRoute {
                    location: *location,
                    mood: *mood,
                    kinds: std::mem::take(kinds),
                    tour: Box::new(tour),
                };
                self.state = next;
                self.touch();
                Ok(())
            }
            _ => Err(self.unexpected("show a tour")),
        }
    }

    /// Plan again from the same location, starting with a fresh mood.
    pub fn new_route(&mut self) -> Result<(), SessionError> {
        match self.state {
            State::ShowingRoute { location, .. } => {
                self.state = State::AwaitingMood { location };
                self.touch();
                Ok(())
            }
            _ => Err(self.unexpected("start a new route")),
        }
    }

    /// Forget the location and wait for a new one.
    pub fn change_location(&mut self) -> Result<(), SessionError> {
        match self.state {
            State::ShowingRoute { .. } => {
                self.state = State::AwaitingLocation;
                self.touch();
                Ok(())
            }
            _ => Err(self.unexpected("change location")),
        }
    }

    /// Drop everything and start over. Valid from any stage.
    pub fn cancel(&mut self) {
        self.state = State::AwaitingLocation;
        self.touch();
    }
}
