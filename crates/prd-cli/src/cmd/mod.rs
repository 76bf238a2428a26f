pub mod config;
pub mod editor;
pub mod generate;
pub mod token;
pub mod ui;
