// netscrub/src/commands/mod.rs
pub mod anonymize;
