pub mod session;
pub mod team;
