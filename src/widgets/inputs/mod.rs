pub mod counter;
pub mod date_text;
pub mod text_edit;
pub mod time_text;
pub mod year_input;
