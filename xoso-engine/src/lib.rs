pub mod extract;
pub mod frequency;
pub mod gap;
pub mod period;
pub mod schedule;
pub mod streak;
pub mod window;
