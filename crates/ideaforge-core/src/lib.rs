pub mod audit_log;
pub mod config;
pub mod contract;
pub mod credentials;
pub mod db;
pub mod errors;
pub mod generation;
pub mod models;
pub mod scrub;
pub mod session;
pub mod studio;
