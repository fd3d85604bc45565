mod base;

pub mod make;
pub mod uci;

pub use base::*;
pub use make::{unmake_raw, Make, Uci, Unchecked};
