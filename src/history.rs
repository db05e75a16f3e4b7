//! Bounded undo/redo log of scene snapshots.

use crate::config::HISTORY_CAPACITY;
use crate::model::Scene;
use std::collections::VecDeque;
use std::sync::Arc;

/// Snapshot log with a cursor.
///
/// The cursor points at the snapshot matching the current scene. Recording
/// drops everything after the cursor, so an undo followed by a new edit
/// discards the redo tail.
#[derive(Debug, Clone)]
pub struct SceneHistory {
    snapshots: VecDeque<Arc<Scene>>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for SceneHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SceneHistory {
    /// Create a history holding at most [`HISTORY_CAPACITY`] snapshots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history holding at most `capacity` snapshots (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    /// Record a snapshot of `scene` as the new current state.
    pub fn record(&mut self, scene: &Scene) {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }

        self.snapshots.push_back(Arc::new(scene.clone()));
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot and return it.
    pub fn undo(&mut self) -> Option<Arc<Scene>> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        self.snapshots.get(cursor).cloned()
    }

    /// Step forward one snapshot and return it.
    pub fn redo(&mut self) -> Option<Arc<Scene>> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor? + 1;
        self.cursor = Some(cursor);
        self.snapshots.get(cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.map_or(false, |c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(false, |c| c + 1 < self.snapshots.len())
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&Scene> {
        self.cursor
            .and_then(|c| self.snapshots.get(c))
            .map(|s| s.as_ref())
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
