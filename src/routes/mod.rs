pub mod hero;
pub mod public;
