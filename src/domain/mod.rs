//! Domain logic: name resolution and transaction assembly.

pub mod assembler;
pub mod connection;
pub mod instruction;
pub mod resolver;
