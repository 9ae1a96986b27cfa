pub mod error;
pub mod routes;
pub mod search_job;
pub mod state;
pub mod view;
