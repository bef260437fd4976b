pub mod activation;
pub mod config;
pub mod contract;
pub mod controller;
pub mod icon_cache;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod runtime;
pub mod transport;
pub mod window_source;
#[cfg(target_os = "linux")]
pub mod x11;
