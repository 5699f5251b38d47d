pub mod services;
pub mod time;
