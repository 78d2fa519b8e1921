pub mod entities;
pub mod machine;
pub mod services;

pub use entities::*;
pub use machine::*;
pub use services::*;
