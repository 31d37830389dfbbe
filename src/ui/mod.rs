pub mod canvas;
pub mod console;
pub mod layout;
pub mod line_input;
pub mod message;
pub mod setting_widget;
pub mod theme;
