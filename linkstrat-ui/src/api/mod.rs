//! HTTP API handlers for linkstrat-ui

pub mod generate;
pub mod health;
pub mod settings;
pub mod strategy;
pub mod wizard;

pub use generate::generate_routes;
pub use health::health_routes;
pub use settings::settings_routes;
pub use strategy::strategy_routes;
pub use wizard::wizard_routes;
