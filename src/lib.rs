pub mod animation;
pub mod data;
pub mod error;
pub mod input;
pub mod rendering;
pub mod script;

pub use error::{SheetError, SheetResult};
