pub mod class;
pub mod code;
pub mod hierarchy;
pub mod module;
pub mod platform;
