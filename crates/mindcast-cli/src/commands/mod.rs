pub mod completions;
pub mod config;
pub mod critical;
pub mod forecast;
pub mod query;
pub mod report;
pub mod today;
