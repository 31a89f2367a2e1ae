use geo::{Point, Rect};
use serde_json::Value;

use super::region::Geography;
use super::viewport::{MapCommand, Viewport, ASSET_ZOOM};

/// Something that happened outside the map which the map has to follow.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The filtered set changed; carries the new marker FeatureCollection.
    MarkersChanged(Value),
    /// A county or zip code was chosen. `bounds` is `None` if no boundary is known for it.
    RegionSelected { geography: Geography, bounds: Option<Rect<f64>> },
    RegionCleared,
    AssetSelected { id: String, center: Point<f64> },
    AssetCleared,
    /// The selected asset was dropped by a filter change. The map stays where it is;
    /// only the state falls back to the active region, if any.
    AssetDeselected { geography: Option<Geography>, bounds: Option<Rect<f64>> },
    /// Escape, view toggle or any other full reset.
    Reset,
}

/// Viewport state machine. Owns no map engine; every transition returns the commands to run on one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSync {
    viewport: Viewport,
}

impl MapSync {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn viewport(&self) -> &Viewport { &self.viewport }

    /// Apply one event: update the viewport state and return the map commands it implies.
    pub fn apply(&mut self, event: MapEvent) -> Vec<MapCommand> {
        let (next, commands) = transition(&self.viewport, event);
        if let Some(next) = next {
            tracing::debug!(from = ?self.viewport, to = ?next, "viewport transition");
            self.viewport = next;
        }
        commands
    }
}

/// Transition table. Returns the next state (`None` keeps the current one) and the commands to emit.
fn transition(current: &Viewport, event: MapEvent) -> (Option<Viewport>, Vec<MapCommand>) {
    match event {
        MapEvent::MarkersChanged(markers) => (None, vec![MapCommand::SetMarkers(markers)]),

        MapEvent::RegionSelected { geography, bounds: Some(bounds) } => (
            Some(Viewport::Region { geography, bounds: Some(bounds) }),
            vec![MapCommand::fit(bounds)],
        ),
        MapEvent::RegionSelected { geography, bounds: None } => {
            tracing::warn!(geography = %geography.display_name(), "no boundary for geography, viewport unchanged");
            (Some(Viewport::Region { geography, bounds: None }), Vec::new())
        }

        MapEvent::AssetSelected { id, center } => (
            Some(Viewport::Asset { id, center }),
            vec![MapCommand::FlyTo { center, zoom: ASSET_ZOOM }],
        ),

        MapEvent::AssetDeselected { geography, bounds } => match (current, geography) {
            (Viewport::Asset { .. }, Some(geography)) => (Some(Viewport::Region { geography, bounds }), Vec::new()),
            (Viewport::Asset { .. }, None) => (Some(Viewport::Default), Vec::new()),
            _ => (None, Vec::new()),
        },

        MapEvent::RegionCleared | MapEvent::AssetCleared | MapEvent::Reset => {
            (Some(Viewport::Default), vec![MapCommand::fit_default()])
        }
    }
}
