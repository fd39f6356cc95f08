pub mod api;
pub mod config;
pub mod models;
pub mod platform;
pub mod playlist;
pub mod recommend;
pub mod request;
pub mod seeds;
