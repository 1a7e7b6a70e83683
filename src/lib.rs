pub mod config;
pub mod core;
pub mod error;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use config::PickerConfig;
pub use core::value::Value;
pub use error::{PickerError, Result};
pub use runtime::{Outcome, Runtime};
pub use widgets::components::date_picker::DatePicker;
