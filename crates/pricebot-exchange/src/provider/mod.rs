//! 시세 프로바이더 구현.

pub mod bitpin;

pub use bitpin::BitpinProvider;
