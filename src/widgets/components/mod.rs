pub mod calendar;
pub mod date_picker;
pub mod segmented;
pub mod wheel;
