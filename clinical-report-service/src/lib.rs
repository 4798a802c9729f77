pub mod models;
pub mod service;

pub use models::*;
pub use service::{AppState, ReportSession, build_router, create_app};
