pub mod animation;
pub mod event;
pub mod hitbox;
pub mod object;
pub mod sprite;
