pub mod entities;
pub mod ports;
pub mod prompts;
pub mod report;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use report::*;
