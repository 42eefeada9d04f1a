#![doc = include_str!("../README.md")]

mod map;
mod raw;
mod strategy;

pub use map::{Error, HashTable, Insert};
pub use strategy::{DefaultStrategy, FnStrategy, Strategy};
