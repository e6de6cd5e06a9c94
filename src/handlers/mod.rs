pub mod auth;
pub mod restaurants;
pub mod users;
