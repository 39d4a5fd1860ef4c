//! Output formats for trees
//!
//! Each formatter only reads `(value, children)` from the tree, the same view an
//! external renderer gets.

pub mod dot;
pub mod tag;
pub mod treeviz;

pub use dot::to_dot;
pub use tag::serialize_ast_tag;
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_width};
