pub mod add;
pub mod cards;
pub mod progress;
pub mod rate;
pub mod review;
pub mod stats;
