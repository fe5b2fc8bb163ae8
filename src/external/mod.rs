pub mod mapbox;

pub use mapbox::MapboxClient;
