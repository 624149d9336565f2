//! Library side of the Mimika CLI: command implementations.

pub mod commands;
