//! Application module for the demo binary

pub mod cli;
pub mod demo;
pub mod startup;
