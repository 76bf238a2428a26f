pub mod document;
pub mod download;
pub mod generate;
pub mod session;
pub mod token;
