//! Indexed expression algebra and canonical serialization.
//!
//! Decision variables and expressions are term collections keyed by
//! (dimension tuple, variable identity). This crate owns the id
//! allocator, index sets, the arithmetic rules for combining indexed
//! expressions, and the deterministic rendering used for diffable model
//! output and solver handoff.

pub mod expr;
pub mod ids;
pub mod index;

pub use expr::{
    apply, format_number, BinOp, Constraint, ExprError, Expression, Operand, Relation,
    RenderOptions, TermGroup, TermId,
};
pub use ids::{AllocError, IdAllocator, IdRange, VariableId};
pub use index::{format_key, IndexSet, IndexSetError, Key, KeyValue};
