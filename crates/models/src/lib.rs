pub mod errors;
pub mod db;
pub mod member;
pub mod meal;
pub mod setting;
