//! Content Blocker Rule List Compiler
//!
//! This crate converts rule lists between the in-memory model and the JSON
//! document consumed by the browser's content blocking engine, and emits rule
//! lists in canonical order.

pub mod analysis;
pub mod builder;
pub mod codec;

pub use analysis::{find_redundant_rules, Redundancy};
pub use builder::{compile_rule_list, CompileOptions, CompileStats, CompiledRuleList};
pub use codec::{decode_rule, decode_rules, encode_rule, encode_rules, from_json_str, to_json_string, CodecError};
