//! Scene - the set of tracks and components being edited.

use super::{Component, Track};
use crate::geometry::{find_nearest_track_point, NearestTrackPoint};

/// Tracks and components in editor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub tracks: Vec<Track>,
    pub components: Vec<Component>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scene has neither tracks nor components.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.components.is_empty()
    }

    /// Add a track.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Apply `update` to the track with `id`. Returns false if there is none.
    pub fn update_track(&mut self, id: &str, update: impl FnOnce(&mut Track)) -> bool {
        match self.tracks.iter_mut().find(|t| t.id == id) {
            Some(track) => {
                update(track);
                true
            }
            None => false,
        }
    }

    /// Remove the track with `id`.
    pub fn remove_track(&mut self, id: &str) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        self.tracks.len() != before
    }

    /// Remove all tracks.
    pub fn clear_tracks(&mut self) {
        self.tracks.clear();
    }

    /// Add a component.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Apply `update` to the component with `id`. Returns false if there is none.
    pub fn update_component(&mut self, id: &str, update: impl FnOnce(&mut Component)) -> bool {
        match self.components.iter_mut().find(|c| c.id == id) {
            Some(component) => {
                update(component);
                true
            }
            None => false,
        }
    }

    /// Remove the component with `id`.
    pub fn remove_component(&mut self, id: &str) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c.id != id);
        self.components.len() != before
    }

    /// Find track by ID.
    pub fn track_by_id(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Find component by ID.
    pub fn component_by_id(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Nearest point on any track within `snap_distance` of `(x, y)`.
    pub fn find_nearest_track_point(
        &self,
        x: f64,
        y: f64,
        snap_distance: f64,
    ) -> Option<NearestTrackPoint<'_>> {
        find_nearest_track_point(&self.tracks, x, y, snap_distance)
    }
}
