//! Live adapters that talk to the real rendering collaborator.

pub mod command;
