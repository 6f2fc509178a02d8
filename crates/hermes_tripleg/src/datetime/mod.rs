pub mod time_domain;
pub mod time_info;
pub mod timezone_db;
