mod comparison_table;
mod context_table;

pub use comparison_table::ComparisonTable;
pub use context_table::ContextTable;
