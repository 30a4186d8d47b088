pub mod otp_config;
pub mod settings;
pub mod users;
