//! Test selection and ordering.

/// Source × configuration product.
///
/// This module verifies that the default selection is the full source-major
/// product, that requested order is kept, and that unknown names and empty
/// lists select nothing extra.
pub mod cartesian;
