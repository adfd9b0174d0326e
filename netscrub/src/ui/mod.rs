// netscrub/src/ui/mod.rs
pub mod output_format;
pub mod substitution_summary;
pub mod theme;
