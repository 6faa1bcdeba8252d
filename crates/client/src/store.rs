//! Reactive client-side location state.
//!
//! # State
//!
//! [`StoreState`] lives in a `tokio::sync::watch` channel. Every change is a
//! single `send_modify`, so subscribers never see a half-applied action.
//!
//! # Actions
//!
//! Each async action brackets one API call:
//!
//! 1. mark a request in flight and clear `error`
//! 2. await the API
//! 3. apply the result (or record the error) and mark the request finished
//!
//! `loading` is true while at least one action is in flight. Concurrent
//! actions apply their results in completion order. An action whose future
//! is dropped before the response arrives leaves the state untouched apart
//! from releasing `loading`.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use pinmap_core::{DEFAULT_RECENT_LIMIT, Location, LocationId, NewLocation};

use crate::api::LocationApi;
use crate::error::ClientError;

/// Map center shown before the user moves the map (Sydney).
pub const DEFAULT_CENTER: (f64, f64) = (-33.8688, 151.2093);

/// Zoom level shown before the user zooms.
pub const DEFAULT_ZOOM: u8 = 13;

/// Map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// `(latitude, longitude)` of the map center.
    pub center: (f64, f64),
    pub zoom: u8,
    /// Whether the map widget has finished initializing.
    pub ready: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            ready: false,
        }
    }
}

/// Everything the UI renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Known locations, most recent first.
    pub locations: Vec<Location>,
    pub selected_location: Option<Location>,
    pub loading: bool,
    /// Message of the most recent failed action.
    pub error: Option<String>,
    pub viewport: Viewport,
}

/// Client-side projection of the location set.
///
/// The projection is disposable: it is only ever replaced or patched from
/// server responses.
pub struct LocationStore<A> {
    api: A,
    state: watch::Sender<StoreState>,
    in_flight: AtomicUsize,
}

impl<A> std::fmt::Debug for LocationStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationStore")
            .field("state", &*self.state.borrow())
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<A: LocationApi> LocationStore<A> {
    /// Create a store with default state.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: watch::Sender::new(StoreState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    // =========================================================================
    // Async actions
    // =========================================================================

    /// Replace `locations` with the server's full list.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also recorded in `error`.
    pub async fn fetch_locations(&self) -> Result<Vec<Location>, ClientError> {
        let action = self.begin();
        let result = self.api.list().await;
        action.finish(result, |state, locations| {
            state.locations.clone_from(locations);
        })
    }

    /// Replace `locations` with the newest `limit` records.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also recorded in `error`.
    pub async fn fetch_recent(&self, limit: u32) -> Result<Vec<Location>, ClientError> {
        let action = self.begin();
        let result = self.api.recent(limit).await;
        action.finish(result, |state, locations| {
            state.locations.clone_from(locations);
        })
    }

    /// Fetch one record without touching `locations`.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also recorded in `error`.
    pub async fn fetch_location(&self, id: LocationId) -> Result<Location, ClientError> {
        let action = self.begin();
        let result = self.api.get(id).await;
        action.finish(result, |_, _| {})
    }

    /// Persist a new location, then prepend and select it.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also recorded in `error`. `locations`
    /// is left unchanged on failure.
    pub async fn add_location(&self, new_location: NewLocation) -> Result<Location, ClientError> {
        let action = self.begin();
        let result = self.api.create(&new_location).await;
        action.finish(result, |state, location| {
            state.locations.insert(0, location.clone());
            state.selected_location = Some(location.clone());
        })
    }

    /// Delete a location, then drop it from `locations`.
    ///
    /// Clears the selection if it pointed at the deleted record.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also recorded in `error`.
    pub async fn delete_location(&self, id: LocationId) -> Result<(), ClientError> {
        let action = self.begin();
        let result = self.api.delete(id).await;
        action.finish(result, |state, ()| {
            state.locations.retain(|location| location.id != id);
            if state
                .selected_location
                .as_ref()
                .is_some_and(|selected| selected.id == id)
            {
                state.selected_location = None;
            }
        })
    }

    fn begin(&self) -> InFlight<'_> {
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
            state.error = None;
        });

        InFlight {
            state: &self.state,
            count: &self.in_flight,
            settled: false,
        }
    }
}

/// One action between its request and its response.
///
/// Dropping it unsettled, e.g. when the action's future is cancelled by a
/// timeout, still releases its share of `loading`.
struct InFlight<'a> {
    state: &'a watch::Sender<StoreState>,
    count: &'a AtomicUsize,
    settled: bool,
}

impl InFlight<'_> {
    /// Apply the result (or record the error) and release `loading`.
    fn finish<T>(
        mut self,
        result: Result<T, ClientError>,
        apply: impl FnOnce(&mut StoreState, &T),
    ) -> Result<T, ClientError> {
        self.settle(|state| match &result {
            Ok(value) => apply(state, value),
            Err(err) => {
                warn!(error = %err, "Location action failed");
                state.error = Some(err.to_string());
            }
        });
        result
    }

    fn settle(&mut self, apply: impl FnOnce(&mut StoreState)) {
        self.settled = true;
        let count = self.count;
        self.state.send_modify(|state| {
            let remaining = count.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            state.loading = remaining > 0;
            apply(state);
        });

        debug!(
            in_flight = count.load(Ordering::SeqCst),
            "Location action finished"
        );
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Location action dropped before completion");
            self.settle(|_| {});
        }
    }
}

impl<A> LocationStore<A> {
    // =========================================================================
    // Local actions
    // =========================================================================

    /// Select a location, replacing any previous selection.
    pub fn select_location(&self, location: Location) {
        self.state
            .send_modify(|state| state.selected_location = Some(location));
    }

    /// Deselect without touching `locations`.
    pub fn clear_selected_location(&self) {
        self.state.send_modify(|state| state.selected_location = None);
    }

    /// Move the map center.
    pub fn set_map_center(&self, latitude: f64, longitude: f64) {
        self.state
            .send_modify(|state| state.viewport.center = (latitude, longitude));
    }

    /// Change the map zoom level.
    pub fn set_map_zoom(&self, zoom: u8) {
        self.state.send_modify(|state| state.viewport.zoom = zoom);
    }

    /// Record whether the map widget has finished initializing.
    pub fn set_map_ready(&self, ready: bool) {
        self.state.send_modify(|state| state.viewport.ready = ready);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Receive every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Known locations, most recent first.
    #[must_use]
    pub fn locations(&self) -> Vec<Location> {
        self.state.borrow().locations.clone()
    }

    /// The selected location, if any.
    #[must_use]
    pub fn selected_location(&self) -> Option<Location> {
        self.state.borrow().selected_location.clone()
    }

    /// Whether any action is awaiting the server.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Message of the most recent failed action, cleared when the next action starts.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Number of known locations.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.state.borrow().locations.len()
    }

    /// The first ten known locations.
    #[must_use]
    pub fn recent_locations(&self) -> Vec<Location> {
        self.state
            .borrow()
            .locations
            .iter()
            .take(DEFAULT_RECENT_LIMIT as usize)
            .cloned()
            .collect()
    }

    /// A known location by ID; never asks the server.
    #[must_use]
    pub fn location_by_id(&self, id: LocationId) -> Option<Location> {
        self.state
            .borrow()
            .locations
            .iter()
            .find(|location| location.id == id)
            .cloned()
    }

    /// Current map viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }
}
