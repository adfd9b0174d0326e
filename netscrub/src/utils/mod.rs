// netscrub/src/utils/mod.rs
pub mod archive;
