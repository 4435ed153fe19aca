//! Greedy route construction.
//!
//! Builds a stop order by repeatedly walking to the nearest remaining place
//! of the category whose turn it is. The mood decides which category opens
//! the route; after that, up to `interleave_factor` attractions are visited
//! between food stops.
//!
//! This is a heuristic, not a tour optimizer: each choice only compares
//! walking times from the current stop to the remaining members of one
//! category.

use tracing::{debug, trace};

use crate::domain::{Category, Coordinate, LegEstimate, Mood, Place, Route};
use crate::oracle::{TravelTimeOracle, TravelTimes};

/// Remaining candidates of one category, in candidate order.
///
/// Places are moved out of the pool and into the route as they are chosen.
#[derive(Debug, Default)]
struct Pool {
    places: Vec<Place>,
}

impl Pool {
    fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.places.iter().map(|p| p.coordinate).collect()
    }

    /// Remove and return the place at `index`, keeping the rest in order.
    fn take(&mut self, index: usize) -> Place {
        self.places.remove(index)
    }
}

/// Index of the reachable destination with the shortest walk. Ties go to
/// the earliest index.
fn nearest_index(row: &[Option<LegEstimate>]) -> Option<usize> {
    row.iter()
        .enumerate()
        .filter_map(|(i, leg)| leg.as_ref().map(|l| (i, l.duration_seconds)))
        .min_by_key(|&(_, secs)| secs)
        .map(|(i, _)| i)
}

/// Route construction state for one request.
struct RouteBuilder<'a, O> {
    food: Pool,
    attractions: Pool,
    route: Route,
    location: Coordinate,
    times: TravelTimes<'a, O>,
    fallbacks: usize,
}

impl<'a, O: TravelTimeOracle> RouteBuilder<'a, O> {
    fn new(candidates: impl IntoIterator<Item = Place>, start: Coordinate, oracle: &'a O) -> Self {
        let (food, attractions): (Vec<Place>, Vec<Place>) =
            candidates.into_iter().partition(Place::is_food);

        Self {
            food: Pool { places: food },
            attractions: Pool {
                places: attractions,
            },
            route: Route::new(),
            location: start,
            times: TravelTimes::new(oracle),
            fallbacks: 0,
        }
    }

    fn pool_mut(&mut self, category: Category) -> &mut Pool {
        match category {
            Category::Food => &mut self.food,
            Category::Attraction => &mut self.attractions,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.food.is_empty() && self.attractions.is_empty()
    }

    /// Move the nearest remaining place of `category` onto the route.
    ///
    /// Issues one batch query from the current location to the whole pool.
    /// When no walking time is available, the first place in pool order is
    /// taken instead. Returns false if the pool was already empty.
    async fn append_nearest(&mut self, category: Category) -> bool {
        if self.pool_mut(category).is_empty() {
            return false;
        }

        let destinations = self.pool_mut(category).coordinates();
        let row = self.times.batch(self.location, &destinations).await;

        let index = match nearest_index(&row) {
            Some(index) => index,
            None => {
                trace!(%category, "no walking times available, taking first in pool");
                self.fallbacks += 1;
                0
            }
        };

        let place = self.pool_mut(category).take(index);
        trace!(%category, place = %place.name, "appending stop");
        self.location = place.coordinate;
        self.route.push(place);
        true
    }
}

/// Order `candidates` into a walking route starting at `start`.
///
/// The result contains every candidate exactly once. Oracle failures only
/// degrade the choice of the next stop; they never abort construction.
/// An `interleave_factor` of zero is treated as one.
pub async fn construct_route<O: TravelTimeOracle>(
    candidates: impl IntoIterator<Item = Place>,
    start: Coordinate,
    mood: Mood,
    interleave_factor: usize,
    oracle: &O,
) -> Route {
    let mut builder = RouteBuilder::new(candidates, start, oracle);

    if builder.is_exhausted() {
        return builder.route;
    }

    builder.append_nearest(mood.leading_category()).await;

    let interleave = interleave_factor.max(1);

    // Each pass appends at least one stop: an attraction if any remain,
    // otherwise a food stop.
    while !builder.is_exhausted() {
        for _ in 0..interleave {
            if !builder.append_nearest(Category::Attraction).await {
                break;
            }
        }

        let after_food = builder.route.last_category() == Some(Category::Food);
        if !builder.food.is_empty() && (!after_food || builder.attractions.is_empty()) {
            builder.append_nearest(Category::Food).await;
        }
    }

    debug!(
        %mood,
        stops = builder.route.len(),
        fallbacks = builder.fallbacks,
        "route constructed"
    );

    builder.route
}
