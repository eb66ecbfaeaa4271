pub mod catalog;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod errors;
pub mod fetch;
pub mod services;
pub mod storage;
