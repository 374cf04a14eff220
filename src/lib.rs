//! Student attendance tracker: a student directory, a daily attendance ledger,
//! monthly reports and xlsx exports, served over actix-web.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod export;
pub mod model;
pub mod report;
pub mod routes;
pub mod store;
