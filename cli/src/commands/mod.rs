pub mod apply;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod head;
pub mod logs;
pub mod shades;
