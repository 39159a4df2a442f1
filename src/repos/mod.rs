//! Thin repositories, one per collection, wrapping find/insert/update/remove.

mod cart_repo;
mod game_repo;
mod platform_repo;

pub use cart_repo::CartRepo;
pub use game_repo::{GameDraft, GamePatch, GameRepo};
pub use platform_repo::{PlatformDraft, PlatformPatch, PlatformRepo};
