// crates/storescope-core/src/registry.rs
// ============================================================================
// Module: Tool Registry
// Description: Immutable name-to-descriptor mapping for the gateway.
// Purpose: Resolve tool names to contracts with fail-fast construction.
// Dependencies: storescope-core::descriptor, thiserror
// ============================================================================

//! ## Overview
//! The registry is built once at startup from the static catalog and never
//! mutated afterward, so concurrent lookups need no locking. Construction
//! fails closed: duplicate tool names and malformed endpoint templates are
//! fatal configuration errors, not per-request conditions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::descriptor::ToolDescriptor;
use crate::descriptor::ToolEndpoint;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal registry construction errors.
///
/// # Invariants
/// - Every variant names the offending tool so startup failures are
///   actionable without a debugger.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two descriptors were registered under the same name.
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
    /// An endpoint template placeholder has no matching path-bound parameter.
    #[error("tool {tool} endpoint placeholder {{{placeholder}}} has no path-bound parameter")]
    UnboundPlaceholder {
        /// Tool with the malformed template.
        tool: String,
        /// Placeholder name missing a parameter binding.
        placeholder: String,
    },
    /// A path-bound parameter is optional or missing from the template.
    #[error("tool {tool} path-bound parameter {param} must be required and appear in the template")]
    InvalidPathBinding {
        /// Tool with the malformed binding.
        tool: String,
        /// Offending parameter name.
        param: String,
    },
    /// A reference dataset selector names an undeclared or optional parameter.
    #[error("tool {tool} reference selector {param} must name a required parameter")]
    InvalidSelector {
        /// Tool with the malformed selector.
        tool: String,
        /// Offending selector name.
        param: String,
    },
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Immutable mapping from tool name to descriptor.
///
/// # Invariants
/// - Built once; no mutation is possible after construction.
/// - Every remote descriptor's template placeholders are fully bound.
#[derive(Debug)]
pub struct ToolRegistry {
    /// Descriptors keyed by unique tool name.
    tools: BTreeMap<String, ToolDescriptor>,
}

impl ToolRegistry {
    /// Builds a registry from a descriptor catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on duplicate names or malformed endpoint
    /// templates.
    pub fn build(descriptors: Vec<ToolDescriptor>) -> Result<Self, RegistryError> {
        let mut tools = BTreeMap::new();
        for descriptor in descriptors {
            validate_bindings(&descriptor)?;
            let name = descriptor.name.clone();
            if tools.insert(name.clone(), descriptor).is_some() {
                return Err(RegistryError::DuplicateName(name));
            }
        }
        Ok(Self {
            tools,
        })
    }

    /// Resolves a tool name to its descriptor.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterates descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }
}

/// Validates that template placeholders and path-bound parameters agree.
fn validate_bindings(descriptor: &ToolDescriptor) -> Result<(), RegistryError> {
    let path = match &descriptor.endpoint {
        ToolEndpoint::Remote {
            path,
        } => path,
        ToolEndpoint::Reference {
            select_by,
            ..
        } => {
            if let Some(selector) = select_by
                && !descriptor.param(selector).is_some_and(|spec| spec.required)
            {
                return Err(RegistryError::InvalidSelector {
                    tool: descriptor.name.clone(),
                    param: selector.clone(),
                });
            }
            return Ok(());
        }
    };
    for placeholder in template_placeholders(path) {
        let bound = descriptor
            .param(&placeholder)
            .is_some_and(|spec| spec.path_bound && spec.required);
        if !bound {
            return Err(RegistryError::UnboundPlaceholder {
                tool: descriptor.name.clone(),
                placeholder,
            });
        }
    }
    for spec in &descriptor.params {
        if spec.path_bound && !path.contains(&format!("{{{}}}", spec.name)) {
            return Err(RegistryError::InvalidPathBinding {
                tool: descriptor.name.clone(),
                param: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// Extracts `{name}` placeholders from an endpoint path template.
fn template_placeholders(path: &str) -> Vec<String> {
    let mut placeholders = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        placeholders.push(rest[start + 1..start + end].to_string());
        rest = &rest[start + end + 1..];
    }
    placeholders
}

// ============================================================================
// SECTION: Tests
// ============================================================================
