//! Boolean filter trees with bidirectional translation.
//!
//! A caller builds (or receives from an editing widget) a tree of rules
//! grouped by AND/OR, then encodes it to a relational WHERE-clause string or
//! a MongoDB-style query document. Best-effort decoders recover a flat tree
//! from either representation for further editing or re-encoding.

pub mod ast;
pub mod config;
pub mod mongo_compiler;
pub mod mongo_parser;
pub mod operator;
pub mod sql_compiler;
pub mod sql_parser;
