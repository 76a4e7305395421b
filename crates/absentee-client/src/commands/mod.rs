pub mod check;
pub mod common;
pub mod days;
pub mod forecast;
pub mod stats;
pub mod trips;
