pub mod app;
pub mod icons;
pub mod theme;
pub mod view;

pub use icons::IconSet;
pub use view::FanState;
