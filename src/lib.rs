pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod rpc;
pub mod services;
pub mod usecase;
pub mod utils;
