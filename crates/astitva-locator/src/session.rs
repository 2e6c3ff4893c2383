//! Location-update loop owning the single "current view".
//!
//! Each position update triggers a full re-fetch and re-rank that replaces
//! the previous view outright. Updates are applied in the order they are
//! awaited; there is no cancellation of an earlier lookup.

use std::sync::Arc;

use astitva_core::Coordinate;

use crate::ip::should_adopt_ip_fallback;
use crate::service::{LocateOptions, LocatorView, ResourceLocator};

/// An event from the host's location source.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Position {
        coordinate: Coordinate,
        accuracy_m: Option<f64>,
    },
    PermissionDenied,
}

/// What a [`LocatorSession::apply`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The view was replaced; see [`LocatorSession::view`].
    Updated,
    /// First permission denial; tell the user once.
    PermissionDenied,
    /// Nothing changed.
    Ignored,
}

pub struct LocatorSession {
    locator: Arc<ResourceLocator>,
    options: LocateOptions,
    position: Option<Coordinate>,
    accuracy_m: Option<f64>,
    view: Option<LocatorView>,
    denial_reported: bool,
}

impl LocatorSession {
    #[must_use]
    pub fn new(locator: Arc<ResourceLocator>, options: LocateOptions) -> Self {
        Self {
            locator,
            options,
            position: None,
            accuracy_m: None,
            view: None,
            denial_reported: false,
        }
    }

    /// Applies one location event.
    pub async fn apply(&mut self, update: LocationUpdate) -> SessionEvent {
        match update {
            LocationUpdate::Position {
                coordinate,
                accuracy_m,
            } => {
                self.accuracy_m = accuracy_m;
                self.refresh(coordinate).await;
                SessionEvent::Updated
            }
            LocationUpdate::PermissionDenied => {
                if self.denial_reported {
                    SessionEvent::Ignored
                } else {
                    self.denial_reported = true;
                    tracing::warn!("location permission denied");
                    SessionEvent::PermissionDenied
                }
            }
        }
    }

    /// Applies an IP-derived position if [`should_adopt_ip_fallback`] says so.
    pub async fn apply_ip_fallback(&mut self, ip: Coordinate) -> SessionEvent {
        if !should_adopt_ip_fallback(self.position, ip) {
            tracing::debug!(%ip, "ip fallback close to current position; ignoring");
            return SessionEvent::Ignored;
        }
        self.accuracy_m = None;
        self.refresh(ip).await;
        SessionEvent::Updated
    }

    async fn refresh(&mut self, coordinate: Coordinate) {
        self.position = Some(coordinate);
        let view = self.locator.locate_with(coordinate, &self.options).await;
        self.view = Some(view);
    }

    #[must_use]
    pub fn view(&self) -> Option<&LocatorView> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    #[must_use]
    pub fn accuracy_m(&self) -> Option<f64> {
        self.accuracy_m
    }
}
