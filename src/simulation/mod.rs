//! Headless simulation support

pub mod app_builder;

pub use app_builder::HeadlessAppBuilder;
