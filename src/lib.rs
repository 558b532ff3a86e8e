pub mod approval {
    pub mod service;
    pub mod validation;
}
pub mod db {
    #[cfg(feature = "server")]
    pub mod connection;
    pub mod models;
    pub mod repository;
}
pub mod error;
pub mod seed;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod app;
#[cfg(feature = "server")]
pub mod config;
