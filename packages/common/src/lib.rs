pub mod text;
pub mod visitor;

pub use text::*;
pub use visitor::*;
