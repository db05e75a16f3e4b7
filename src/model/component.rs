//! Component - a positioned railway object (signal, switch, station, platform).

use super::Point;
use serde_json::Value;

/// Type-specific data of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    /// Lineside signal.
    Signal {
        aspect: String,
        signal_number: Option<String>,
        signal_type: String,
    },
    /// Turnout.
    Switch { state: String, switch_type: String },
    /// Station building. `platforms` is kept as drawn, even when it is not
    /// an array.
    Station {
        station_type: String,
        platforms: Value,
    },
    /// Passenger platform.
    Platform { length: f64, height: f64 },
    /// Any other component type drawn in the editor, or none at all.
    Other { type_name: Option<String> },
}

impl ComponentKind {
    /// The type string used on the wire; `None` when the editor gave none.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ComponentKind::Signal { .. } => Some("signal"),
            ComponentKind::Switch { .. } => Some("switch"),
            ComponentKind::Station { .. } => Some("station"),
            ComponentKind::Platform { .. } => Some("platform"),
            ComponentKind::Other { type_name } => type_name.as_deref(),
        }
    }
}

/// A positioned railway object.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Unique component identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Canvas position.
    pub position: Point,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Creation time as recorded by the editor.
    pub created_at: Option<String>,
    /// Type-specific data.
    pub kind: ComponentKind,
}

impl Component {
    /// Create a component at a position with no rotation.
    pub fn new(id: impl Into<String>, position: Point, kind: ComponentKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            position,
            rotation: 0.0,
            created_at: None,
            kind,
        }
    }

    /// Create a main signal showing red.
    pub fn signal(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            Point::new(x, y),
            ComponentKind::Signal {
                aspect: "red".to_string(),
                signal_number: None,
                signal_type: "main".to_string(),
            },
        )
    }

    /// Create a simple switch in normal position.
    pub fn switch(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            Point::new(x, y),
            ComponentKind::Switch {
                state: "normal".to_string(),
                switch_type: "simple".to_string(),
            },
        )
    }

    /// The type string used on the wire.
    pub fn type_name(&self) -> Option<&str> {
        self.kind.type_name()
    }
}
