//! Built-in functions

pub mod logical;
pub mod math;
pub mod text;

use std::collections::HashMap;

use crate::evaluator::FormulaValue;

/// Function implementation signature
///
/// Arguments arrive evaluated; spreadsheet errors are returned as
/// [`FormulaValue::Error`] rather than Rust errors.
pub type FunctionImpl = fn(&[FormulaValue]) -> FormulaValue;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a registry with every built-in function
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        let defs: [(&'static str, usize, Option<usize>, FunctionImpl); 15] = [
            ("SUM", 1, None, math::fn_sum),
            ("AVERAGE", 1, None, math::fn_average),
            ("MIN", 1, None, math::fn_min),
            ("MAX", 1, None, math::fn_max),
            ("COUNT", 1, None, math::fn_count),
            ("COUNTA", 1, None, math::fn_counta),
            ("ABS", 1, Some(1), math::fn_abs),
            ("ROUND", 2, Some(2), math::fn_round),
            ("IF", 2, Some(3), logical::fn_if),
            ("IFERROR", 2, Some(2), logical::fn_iferror),
            ("AND", 1, None, logical::fn_and),
            ("OR", 1, None, logical::fn_or),
            ("NOT", 1, Some(1), logical::fn_not),
            ("CONCATENATE", 1, None, text::fn_concatenate),
            ("LEN", 1, Some(1), text::fn_len),
        ];
        for (name, min_args, max_args, implementation) in defs {
            registry.register(FunctionDef {
                name,
                min_args,
                max_args,
                implementation,
            });
        }

        registry
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name.to_uppercase().as_str())
    }

    /// Register a function, replacing any previous definition
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten arguments into scalars, tagging whether each came from a range
///
/// Range members and direct arguments follow different coercion rules in
/// aggregate functions: text in a range is skipped, text typed directly is
/// coerced.
pub(crate) fn flatten(args: &[FormulaValue]) -> Vec<(&FormulaValue, bool)> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            FormulaValue::Array(rows) => {
                out.extend(rows.iter().flatten().map(|v| (v, true)));
            }
            v => out.push((v, false)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("sum").is_some());
        assert!(registry.get("Concatenate").is_some());
        assert!(registry.get("VLOOKUP").is_none());
    }
}
