pub mod ads;
pub mod app;
pub mod config;
pub mod images;
pub mod models;
pub mod tmdb;
pub mod view;
