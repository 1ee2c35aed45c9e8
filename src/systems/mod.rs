pub mod cabinet;
pub mod export;
pub mod interaction;
pub mod room;
pub mod ui;
