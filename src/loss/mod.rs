pub mod abs_sum;

pub use abs_sum::AbsSumLoss;
