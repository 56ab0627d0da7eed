//! Minimal engine collaborator for headless play and the terminal driver.

pub mod arcade;

pub use arcade::*;
