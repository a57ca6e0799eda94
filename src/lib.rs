#![warn(rust_2018_idioms)]

pub mod addr;
pub mod candidate;
pub mod description;
pub mod error;
pub mod rand;
pub mod resolver;
