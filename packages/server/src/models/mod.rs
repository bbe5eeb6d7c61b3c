pub mod admin;
pub mod registration;
pub mod shared;
pub mod team;
