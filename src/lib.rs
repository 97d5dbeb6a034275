// src/lib.rs

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod models;
pub mod pedagogy;
pub mod repository;
pub mod session;
