//! Candidate set construction.
//!
//! Merges discovered places into one bounded working set, ranked so the
//! most popular places survive the cap.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::Place;
use crate::places::PlaceGroup;

use super::config::MAX_CANDIDATES;

/// Ranked, deduplicated places a tour is built from.
///
/// Sorted by popularity, best first, and never longer than the limit it
/// was built with.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandidateSet {
    places: Vec<Place>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }
}

impl IntoIterator for CandidateSet {
    type Item = Place;
    type IntoIter = std::vec::IntoIter<Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.into_iter()
    }
}

/// Build a candidate set of at most [`MAX_CANDIDATES`] places.
pub fn build_candidate_set(groups: Vec<PlaceGroup>) -> CandidateSet {
    build_candidate_set_with_limit(groups, MAX_CANDIDATES)
}

/// Build a candidate set of at most `limit` places.
///
/// Groups are merged in order, each place is classified under its group's
/// kind, and duplicates (same place id) keep their first occurrence. The
/// merged list is sorted by popularity, best first, with ties keeping
/// discovery order, then truncated.
pub fn build_candidate_set_with_limit(groups: Vec<PlaceGroup>, limit: usize) -> CandidateSet {
    let mut seen = HashSet::new();
    let mut places: Vec<Place> = groups
        .into_iter()
        .flat_map(|group| {
            let kind = group.kind;
            group
                .places
                .into_iter()
                .map(move |raw| Place::from_raw(raw, kind))
        })
        .filter(|place| seen.insert(place.id.clone()))
        .collect();

    rank_by_popularity(&mut places);
    places.truncate(limit);

    CandidateSet { places }
}

/// Sort best-first by popularity. The sort is stable, so equal scores keep
/// their relative order.
pub fn rank_by_popularity(places: &mut [Place]) {
    places.sort_by(|a, b| b.popularity().total_cmp(&a.popularity()));
}
