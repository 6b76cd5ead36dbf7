pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{KwError, Result};
pub use tolerance::Tolerance;
