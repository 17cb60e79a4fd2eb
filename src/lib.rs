pub mod app;
pub mod config;
pub mod layout;
pub mod noise_field;
pub mod palette;
pub mod render;
pub mod surface;
pub mod terminal;
pub mod visual;
