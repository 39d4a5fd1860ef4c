//! Main module for exparse library functionality

pub mod analysis;
pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;

#[cfg(test)]
pub mod testing;
