pub mod cookies;
pub mod http_helpers;
pub mod logger;
