mod coin;

pub use coin::{by_timestamp, sort_by_timestamp, Coin, Series};
