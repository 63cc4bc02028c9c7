//! Named-function registry

pub mod aggregate;

use crate::error::{FormulaError, FormulaResult};
use std::collections::HashMap;
use sylk_sheets_core::Scalar;

/// Function implementation signature
///
/// Ranges and cell references are flattened into the argument slice before
/// the call, so implementations only ever see scalars.
pub type FunctionImpl = fn(&[Scalar]) -> FormulaResult<Scalar>;

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name (lowercase)
    pub name: String,
    /// Implementation; `None` for a name bound before it was registered
    pub implementation: Option<FunctionImpl>,
}

impl FunctionDef {
    pub fn is_bound(&self) -> bool {
        self.implementation.is_some()
    }
}

/// Function registry
///
/// Names are case-insensitive. Compiling a formula binds every name it
/// calls: unknown names get a placeholder entry that fails at evaluation
/// time until [`FunctionRegistry::register`] fills it in.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with the default aggregates
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_aggregate_functions();
        registry
    }

    /// Create a registry with no functions at all
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_lowercase())
    }

    /// Register (or replace) a function
    pub fn register(&mut self, name: &str, implementation: FunctionImpl) {
        let name = name.to_lowercase();
        log::debug!("registering function '{}'", name);
        self.functions.insert(
            name.clone(),
            FunctionDef {
                name,
                implementation: Some(implementation),
            },
        );
    }

    /// Bind a name, creating a placeholder entry if it is not registered
    pub fn bind(&mut self, name: &str) -> &FunctionDef {
        let name = name.to_lowercase();
        self.functions
            .entry(name.clone())
            .or_insert_with(|| {
                log::debug!("binding placeholder for function '{}'", name);
                FunctionDef {
                    name,
                    implementation: None,
                }
            })
    }

    /// Get the implementation for a name
    pub fn resolve(&self, name: &str) -> FormulaResult<FunctionImpl> {
        self.get(name)
            .and_then(|def| def.implementation)
            .ok_or_else(|| FormulaError::UnknownFunction(name.to_lowercase()))
    }

    fn register_aggregate_functions(&mut self) {
        self.register("sum", aggregate::fn_sum);
        self.register("average", aggregate::fn_average);
        self.register("min", aggregate::fn_min);
        self.register("max", aggregate::fn_max);
        self.register("count", aggregate::fn_count);
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fn_first(args: &[Scalar]) -> FormulaResult<Scalar> {
        Ok(args.first().cloned().unwrap_or_default())
    }

    #[test]
    fn test_defaults_registered() {
        let registry = FunctionRegistry::new();
        for name in ["sum", "AVERAGE", "Min", "max", "count"] {
            assert!(registry.resolve(name).is_ok(), "{} missing", name);
        }
        assert!(FunctionRegistry::empty().get("sum").is_none());
    }

    #[test]
    fn test_bind_then_register() {
        let mut registry = FunctionRegistry::empty();
        assert!(!registry.bind("First").is_bound());
        assert!(matches!(
            registry.resolve("first"),
            Err(FormulaError::UnknownFunction(name)) if name == "first"
        ));

        registry.register("FIRST", fn_first);
        let f = registry.resolve("first").unwrap();
        assert_eq!(f(&[Scalar::Number(7.0)]).unwrap(), Scalar::Number(7.0));

        // Binding again keeps the registered implementation
        assert!(registry.bind("first").is_bound());
    }
}
