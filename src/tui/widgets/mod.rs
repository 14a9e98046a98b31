pub mod color;
pub mod help;
pub mod results;
pub mod status_bar;
pub mod tag_input;
pub mod text_input;
