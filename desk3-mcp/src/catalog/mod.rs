// Operation catalog
//
// Static description of every Desk3 endpoint the server relays to, plus
// the lookup tables the tool and resource surfaces resolve requests with.
// The catalog is assembled once at startup and never mutated.

mod entries;

use std::collections::{HashMap, HashSet};
use std::fmt;
use url::Url;

use crate::errors::CatalogError;

pub use entries::OPERATIONS;

/// URI scheme of every exposed resource
pub const RESOURCE_SCHEME: &str = "desk3";

/// HTTP method of an upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// An input parameter accepted by an operation
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub required: bool,
    /// Validation hint published in the tool schema
    pub pattern: Option<&'static str>,
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

/// Exposure of an operation on the resource surface
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Exposure of an operation on the tool surface
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// One upstream call and its metadata
#[derive(Debug)]
pub struct Operation {
    pub id: &'static str,
    pub method: HttpMethod,
    /// Path relative to the upstream base URL
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    pub description: &'static str,
    pub resource: Option<ResourceSpec>,
    pub tool: Option<ToolSpec>,
}

impl Operation {
    /// Look up a declared parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Declared parameters that must be supplied
    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }
}

/// Lookup key for a resource URI: host followed by path, e.g. `gas/suggest`
pub fn resource_key(uri: &Url) -> Option<String> {
    let host = uri.host_str()?;
    let path = uri.path().trim_end_matches('/');
    Some(format!("{}{}", host, path))
}

/// Index over a static operation table
pub struct Catalog {
    operations: &'static [Operation],
    by_resource: HashMap<String, usize>,
}

impl Catalog {
    /// Index an operation table, rejecting duplicate or malformed entries
    pub fn new(operations: &'static [Operation]) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut tools = HashSet::new();
        let mut by_resource = HashMap::new();

        for (idx, op) in operations.iter().enumerate() {
            if !ids.insert(op.id) {
                return Err(CatalogError::DuplicateOperation(op.id.to_string()));
            }

            if let Some(tool) = &op.tool {
                if !tools.insert(tool.name) {
                    return Err(CatalogError::DuplicateTool(tool.name.to_string()));
                }
            }

            if let Some(resource) = &op.resource {
                let invalid = || CatalogError::InvalidResourceUri {
                    operation: op.id.to_string(),
                    uri: resource.uri.to_string(),
                };
                let uri = Url::parse(resource.uri).map_err(|_| invalid())?;
                if uri.scheme() != RESOURCE_SCHEME {
                    return Err(invalid());
                }
                let key = resource_key(&uri).ok_or_else(invalid)?;
                if by_resource.insert(key, idx).is_some() {
                    return Err(CatalogError::DuplicateResource(resource.uri.to_string()));
                }
            }
        }

        Ok(Self {
            operations,
            by_resource,
        })
    }

    /// The built-in Desk3 catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(OPERATIONS)
    }

    /// All operations in declaration order
    pub fn operations(&self) -> &'static [Operation] {
        self.operations
    }

    /// Resolve a resource key (see [`resource_key`]) to its operation
    pub fn by_resource_key(&self, key: &str) -> Option<&'static Operation> {
        self.by_resource.get(key).map(|&idx| &self.operations[idx])
    }

    /// Operations exposed as tools, in declaration order
    pub fn tools(&self) -> impl Iterator<Item = (&'static Operation, &'static ToolSpec)> {
        self.operations
            .iter()
            .filter_map(|op| op.tool.as_ref().map(|t| (op, t)))
    }

    /// Operations exposed as resources, in declaration order
    pub fn resources(&self) -> impl Iterator<Item = (&'static Operation, &'static ResourceSpec)> {
        self.operations
            .iter()
            .filter_map(|op| op.resource.as_ref().map(|r| (op, r)))
    }
}
