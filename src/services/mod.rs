pub mod bgg;
pub mod comparison;
pub mod similarity;

pub use bgg::BggClient;
pub use comparison::{compare_users, ComparisonReport};
pub use similarity::{round_score, similarity};
