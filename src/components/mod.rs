pub mod app;
pub mod game_view;
pub mod hud;
pub mod message_overlay;
pub mod touch_controls;
