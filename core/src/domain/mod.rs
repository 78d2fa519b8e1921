pub mod capture;
pub mod common;
pub mod meal_analysis;
pub mod view_state;
