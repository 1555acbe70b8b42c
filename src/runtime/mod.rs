pub mod http;
pub mod lifetime;
pub mod logging;
