//! glycora-web: HTTP front end for the Glycora diabetes risk scorer.
//!   - `GET /`               input form
//!   - `POST /predict`       probability, diagnosis and deviation chart
//!   - `POST /api/deviations` ranked deviations only
//!   - `GET /health`         liveness

pub mod chart;
pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
