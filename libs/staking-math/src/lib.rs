#![no_std]

pub mod distribution;
pub mod wrapping;

pub use distribution::*;
pub use wrapping::*;
