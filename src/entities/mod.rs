pub mod cart;
pub mod game;
pub mod platform;
pub mod session;
