//! 도메인 타입.

mod instrument;
mod outcome;
mod report;
mod retry;

pub use instrument::*;
pub use outcome::*;
pub use report::*;
pub use retry::*;
