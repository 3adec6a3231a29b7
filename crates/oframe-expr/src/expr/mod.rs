//! Expression types for indexed optimization modeling.
//!
//! - `core`       — Expression: per-key term buckets partitioned by degree
//! - `arith`      — arithmetic engine with dimensional broadcast
//! - `constraint` — Constraint: folded expression, relation, per-key constant
//! - `render`     — canonical string serialization
//! - `error`      — arithmetic and rendering errors

pub mod arith;
pub mod constraint;
pub mod core;
pub mod error;
pub mod render;

pub use arith::{apply, BinOp, Operand};
pub use constraint::{Constraint, Relation};
pub use core::{Expression, TermGroup, TermId};
pub use error::ExprError;
pub use render::{format_number, RenderOptions};
