pub mod bounds;
pub mod calendar;
pub mod datetime;
pub mod locale;
pub mod mode;
pub mod selection;
