pub mod decorations;
pub mod frame;
pub mod frame_json;
pub mod span;
pub mod style;
pub mod theme;
