pub mod app;
pub mod colors;
pub mod components;
pub mod handler_result;
pub mod styles;
pub mod surface;
pub mod terminal_lifecycle;
