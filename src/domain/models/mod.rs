mod embedding;
mod stored_point;
mod token;

pub use embedding::*;
pub use stored_point::*;
pub use token::*;
