pub mod base;
pub mod camarilla;
