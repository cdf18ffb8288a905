//! Service layer for the mess ledger.
//! - Keeps member, meal and rate business rules independent of the web framework.
//! - Talks to storage only through the repository traits, so a SeaORM handle
//!   and an in-memory store are interchangeable.

pub mod errors;
pub mod domain;
pub mod period;
pub mod repository;
pub mod repo;
pub mod member_service;
pub mod meal_service;
pub mod rate_service;
#[cfg(test)]
pub mod test_support;

pub use meal_service::MealService;
pub use member_service::MemberService;
pub use rate_service::RateService;
