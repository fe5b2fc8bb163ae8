pub mod routes;
pub mod search;
pub mod stations;
pub mod theme;
pub mod view;
