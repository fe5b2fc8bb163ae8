pub mod api;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod location;
pub mod server;
pub mod stations;
pub mod theme;
pub mod view;

#[cfg(test)]
mod testing;
