#[path = "../common/mod.rs"]
mod common;

mod app;
mod config;
mod failures;
mod flight_model;
