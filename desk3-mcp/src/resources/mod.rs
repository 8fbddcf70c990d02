// Resources module for the MCP server
//
// Exposes catalog operations as `desk3://` URIs. Query string parameters
// on the URI become the upstream query parameters.

use std::collections::HashMap;
use std::sync::Arc;
use url::Url;
use log::debug;

use crate::catalog::{resource_key, Catalog, RESOURCE_SCHEME};
use crate::errors::ResourceError;
use crate::mcp::protocol::{ResourceContents, ResourceDescriptor};
use crate::upstream::UpstreamClient;

/// MIME type of every resource body
pub const MIME_TYPE: &str = "application/json";

/// Resource surface over the operation catalog
pub struct ResourceSurface {
    catalog: Arc<Catalog>,
    client: Arc<UpstreamClient>,
}

impl ResourceSurface {
    pub fn new(catalog: Arc<Catalog>, client: Arc<UpstreamClient>) -> Self {
        Self { catalog, client }
    }

    /// Static descriptors, one per resource-exposed operation
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.catalog
            .resources()
            .map(|(_, spec)| ResourceDescriptor {
                uri: spec.uri.to_string(),
                name: spec.name.to_string(),
                description: spec.description.to_string(),
                mime_type: MIME_TYPE.to_string(),
            })
            .collect()
    }

    /// Resolve a resource URI, fetch it upstream and pretty-print the body
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let parsed = Url::parse(uri).map_err(|_| ResourceError::InvalidUri(uri.to_string()))?;
        if parsed.scheme() != RESOURCE_SCHEME {
            return Err(ResourceError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let key = resource_key(&parsed).ok_or_else(|| ResourceError::InvalidUri(uri.to_string()))?;
        let operation = self
            .catalog
            .by_resource_key(&key)
            .ok_or_else(|| ResourceError::UnknownResource(key.clone()))?;

        // Last occurrence of a repeated key wins.
        let query: HashMap<String, String> = parsed.query_pairs().into_owned().collect();

        let mut params = Vec::new();
        for spec in operation.params {
            match query.get(spec.name).filter(|v| !v.is_empty()) {
                Some(value) => params.push((spec.name.to_string(), value.clone())),
                None if spec.required => {
                    return Err(ResourceError::MissingParameter(spec.name.to_string()));
                },
                None => {}
            }
        }

        debug!("Reading resource {} via operation {}", uri, operation.id);
        let value = self.client.invoke(operation, &params).await?;
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());

        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: MIME_TYPE.to_string(),
            text,
        })
    }
}
