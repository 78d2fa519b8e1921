pub mod capture_meal;
pub mod get_page;
pub mod get_view;
pub mod reset_view;
