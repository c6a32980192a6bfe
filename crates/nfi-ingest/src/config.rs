//! Configuration management

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default AWS region.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default DynamoDB table for invoices.
pub const DEFAULT_INVOICE_TABLE: &str = "NotasFiscais";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub aws: AwsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// AWS client configuration
///
/// `endpoint` overrides both the S3 and DynamoDB endpoints, which is
/// how LocalStack-style local stacks are addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    pub endpoint: Option<String>,
    pub region: String,
    pub table: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub path_style: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("NFI_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("NFI_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: std::env::var("NFI_SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            aws: AwsConfig {
                endpoint: std::env::var("AWS_ENDPOINT_URL").ok(),
                region: std::env::var("AWS_REGION")
                    .unwrap_or_else(|_| DEFAULT_AWS_REGION.to_string()),
                table: std::env::var("INVOICE_TABLE")
                    .unwrap_or_else(|_| DEFAULT_INVOICE_TABLE.to_string()),
                access_key: std::env::var("AWS_ACCESS_KEY_ID").ok(),
                secret_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
                path_style: std::env::var("AWS_S3_PATH_STYLE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.aws.table.is_empty() {
            anyhow::bail!("Invoice table name cannot be empty");
        }

        if self.aws.access_key.is_some() != self.aws.secret_key.is_some() {
            anyhow::bail!(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together or not at all"
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            aws: AwsConfig {
                endpoint: None,
                region: DEFAULT_AWS_REGION.to_string(),
                table: DEFAULT_INVOICE_TABLE.to_string(),
                access_key: None,
                secret_key: None,
                path_style: false,
            },
        }
    }
}

impl AwsConfig {
    /// Resolve the shared AWS SDK configuration
    ///
    /// Falls back to the default provider chain when no static
    /// credentials are configured.
    pub async fn load(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&self.access_key, &self.secret_key) {
            loader =
                loader.credentials_provider(Credentials::from_keys(access_key, secret_key, None));
        }

        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }

    /// Point the clients at a LocalStack-style local stack
    pub fn for_localstack(endpoint: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            region: DEFAULT_AWS_REGION.to_string(),
            table: table.into(),
            access_key: Some("test".to_string()),
            secret_key: Some("test".to_string()),
            path_style: true,
        }
    }
}
