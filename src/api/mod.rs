//! HTTP surface: the static file server feeding the visualization.

pub mod server;
