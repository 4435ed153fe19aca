//! Place discovery.
//!
//! A place provider answers "what places of this type are near here?".
//! This module provides the Google Places client, a fixture-backed provider
//! for offline use, and [`discover`], which queries a provider once per
//! requested place kind.

mod client;
mod error;
mod fixture;
mod types;

use std::future::Future;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{Coordinate, PlaceKind, RawPlace};

pub use client::{DEFAULT_MAX_RESULTS, PlacesClient, PlacesConfig};
pub use error::PlacesError;
pub use fixture::FixturePlaces;
pub use types::{Geometry, LatLng, NearbyResult, NearbySearchResponse};

/// A source of nearby places.
pub trait PlaceProvider: Send + Sync {
    /// Places of `place_type` within `radius_m` metres of `center`, already
    /// capped to the provider's per-query limit.
    fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        place_type: &str,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send;
}

/// Places discovered for one requested kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceGroup {
    pub kind: PlaceKind,
    pub places: Vec<RawPlace>,
}

/// Query `provider` for every kind, concurrently.
///
/// Groups come back in the order the kinds were given. A failed query is
/// logged and contributes an empty group.
pub async fn discover<P: PlaceProvider>(
    provider: &P,
    center: Coordinate,
    kinds: &[PlaceKind],
    radius_m: u32,
) -> Vec<PlaceGroup> {
    let queries = kinds.iter().map(|&kind| async move {
        let places = match provider.nearby(center, radius_m, kind.query_type()).await {
            Ok(places) => places,
            Err(e) => {
                warn!(%kind, error = %e, "place discovery failed");
                Vec::new()
            }
        };
        debug!(%kind, found = places.len(), "discovered places");
        PlaceGroup { kind, places }
    });

    join_all(queries).await
}

/// The place providers the server can run with.
pub enum PlaceBackend {
    Google(PlacesClient),
    Fixture(FixturePlaces),
}

impl PlaceBackend {
    pub fn name(&self) -> &'static str {
        match self {
            PlaceBackend::Google(_) => "google-places",
            PlaceBackend::Fixture(_) => "fixture",
        }
    }
}

impl PlaceProvider for PlaceBackend {
    async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        match self {
            PlaceBackend::Google(client) => client.nearby(center, radius_m, place_type).await,
            PlaceBackend::Fixture(fixture) => fixture.nearby(center, radius_m, place_type).await,
        }
    }
}
