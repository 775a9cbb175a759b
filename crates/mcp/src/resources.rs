// MCP resources

use crate::protocol::{ReadResourceResult, ResourceContents, ResourceDescriptor, ServerInfo};
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Resource provider trait
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    fn descriptor(&self) -> ResourceDescriptor;

    /// Produce the current contents. Called on every read.
    async fn read(&self) -> Result<ResourceContents>;
}

/// Resources keyed by URI
pub struct ResourceRegistry {
    resources: BTreeMap<String, Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, resource: Arc<dyn Resource>) -> Result<()> {
        let uri = resource.descriptor().uri;
        if self.resources.contains_key(&uri) {
            bail!("Resource already registered: {}", uri);
        }
        self.resources.insert(uri, resource);
        Ok(())
    }

    pub fn list(&self) -> Vec<ResourceDescriptor> {
        self.resources.values().map(|r| r.descriptor()).collect()
    }

    /// Read a resource. `Ok(None)` means the URI is unknown.
    pub async fn read(&self, uri: &str) -> Result<Option<ReadResourceResult>> {
        let Some(resource) = self.resources.get(uri) else {
            return Ok(None);
        };
        let contents = resource.read().await?;
        Ok(Some(ReadResourceResult {
            contents: vec![contents],
        }))
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub const SETTINGS_URI: &str = "config://settings";

/// Runtime facts about this server instance
pub struct ServerSettingsResource {
    info: ServerInfo,
    started_at: Instant,
}

impl ServerSettingsResource {
    pub fn new(info: ServerInfo) -> Self {
        Self {
            info,
            started_at: Instant::now(),
        }
    }
}

#[async_trait::async_trait]
impl Resource for ServerSettingsResource {
    fn descriptor(&self) -> ResourceDescriptor {
        ResourceDescriptor {
            uri: SETTINGS_URI.to_string(),
            name: "config".to_string(),
            title: Some("Server Settings".to_string()),
            description: Some("Server name, version and uptime".to_string()),
            mime_type: Some("application/json".to_string()),
        }
    }

    async fn read(&self) -> Result<ResourceContents> {
        let settings = serde_json::json!({
            "serverName": self.info.name,
            "version": self.info.version,
            "uptime": self.started_at.elapsed().as_secs_f64(),
            "rustVersion": env!("VERGEN_RUSTC_SEMVER"),
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        });

        Ok(ResourceContents {
            uri: SETTINGS_URI.to_string(),
            mime_type: Some("application/json".to_string()),
            text: serde_json::to_string_pretty(&settings)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ServerSettingsResource {
        ServerSettingsResource::new(ServerInfo {
            name: "mono-mcp-server".to_string(),
            version: "1.0.0".to_string(),
        })
    }

    #[tokio::test]
    async fn test_settings_contents() {
        let mut registry = ResourceRegistry::new();
        registry.register(Arc::new(settings())).unwrap();

        let result = registry.read(SETTINGS_URI).await.unwrap().unwrap();
        assert_eq!(result.contents.len(), 1);

        let contents = &result.contents[0];
        assert_eq!(contents.mime_type.as_deref(), Some("application/json"));

        let value: serde_json::Value = serde_json::from_str(&contents.text).unwrap();
        assert_eq!(value["serverName"], "mono-mcp-server");
        assert_eq!(value["version"], "1.0.0");
        assert!(value["uptime"].as_f64().unwrap() >= 0.0);
        // Compiler that built the server, not the declared minimum
        let rust_version = value["rustVersion"].as_str().unwrap();
        assert_eq!(rust_version, env!("VERGEN_RUSTC_SEMVER"));
        assert!(rust_version.split('.').count() >= 3, "{}", rust_version);
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_uri() {
        let mut registry = ResourceRegistry::new();
        registry.register(Arc::new(settings())).unwrap();

        assert!(registry.read("config://missing").await.unwrap().is_none());
        assert!(registry.register(Arc::new(settings())).is_err());
    }

    #[test]
    fn test_descriptor() {
        let descriptor = settings().descriptor();
        assert_eq!(descriptor.uri, "config://settings");
        assert_eq!(descriptor.name, "config");
        assert_eq!(descriptor.title.as_deref(), Some("Server Settings"));
    }
}
