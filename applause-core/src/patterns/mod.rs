//! Pattern declarations and their compilation.
//!
//! Declarations are flattened (for key/value sources), normalized into
//! compiled matcher/replacer pairs and ordered by the resolver. The result is
//! what the substitution engine applies.

pub mod declaration;
pub mod flatten;
pub mod normalizer;
pub mod resolver;
pub mod template;
