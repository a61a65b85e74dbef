//! Screen rendering modules

pub mod dashboard;

pub(crate) use dashboard::render_dashboard;
