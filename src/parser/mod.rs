//! Scene parser module.

mod scene;

pub use scene::{parse_scene_file, parse_scene_str};
