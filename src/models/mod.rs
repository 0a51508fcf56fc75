pub mod counts;
pub mod exercise;

pub use counts::RepCounts;
pub use exercise::Exercise;
