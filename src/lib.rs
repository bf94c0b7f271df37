pub mod app;
pub mod favorites;
pub mod gesture;
pub mod message;
pub mod model;
pub mod poster;
pub mod state;
pub mod storage;
pub mod tmdb;
pub mod ui;
