//! Value Object Module

pub mod display_name;
pub mod email;
pub mod preferences;
pub mod user_password;
