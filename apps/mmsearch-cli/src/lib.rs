pub mod cli;
pub mod images;
pub mod logging;
pub mod render;
