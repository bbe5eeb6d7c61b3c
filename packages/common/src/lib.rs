pub mod error;
pub mod person;
pub mod theme;

pub use error::ParseEnumError;
pub use person::{Gender, Role};
pub use theme::Theme;
