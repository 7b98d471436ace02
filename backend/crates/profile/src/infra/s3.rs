//! S3-compatible blob store (MinIO in development)

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::domain::blob_store::BlobStore;
use crate::error::ProfileResult;

/// Connection settings for the photo bucket
#[derive(Clone)]
pub struct S3Config {
    /// `host:port` of the S3 API, without scheme
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub use_ssl: bool,
    /// `host[:port]` under which objects are publicly reachable
    pub public_domain: String,
    pub region: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: "localhost:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket: "user-photos".to_string(),
            use_ssl: false,
            public_domain: "localhost:9000".to_string(),
            region: "us-east-1".to_string(),
        }
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field("bucket", &self.bucket)
            .field("use_ssl", &self.use_ssl)
            .field("public_domain", &self.public_domain)
            .field("region", &self.region)
            .finish()
    }
}

impl S3Config {
    fn scheme(&self) -> &'static str {
        if self.use_ssl { "https" } else { "http" }
    }

    fn endpoint_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.endpoint)
    }

    /// Public URL of an object: `{scheme}://{public_domain}/{bucket}/{key}`
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}://{}/{}/{}",
            self.scheme(),
            self.public_domain,
            self.bucket,
            key
        )
    }
}

/// Blob store backed by an S3-compatible bucket
#[derive(Clone)]
pub struct S3BlobStore {
    store: Arc<dyn ObjectStore>,
    config: S3Config,
}

impl S3BlobStore {
    pub fn new(config: S3Config) -> ProfileResult<Self> {
        let store = AmazonS3Builder::new()
            .with_endpoint(config.endpoint_url())
            .with_access_key_id(&config.access_key)
            .with_secret_access_key(&config.secret_key)
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_allow_http(!config.use_ssl)
            .with_virtual_hosted_style_request(false)
            .build()?;

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }

    /// Check that the bucket is reachable
    pub async fn probe(&self) -> ProfileResult<()> {
        self.store.list_with_delimiter(None).await?;
        Ok(())
    }
}

impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> ProfileResult<String> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&Path::from(key), PutPayload::from(body), options)
            .await?;

        Ok(self.config.public_url(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let config = S3Config::default();
        assert_eq!(
            config.public_url("users/1/profile_5.png"),
            "http://localhost:9000/user-photos/users/1/profile_5.png"
        );

        let tls = S3Config {
            use_ssl: true,
            public_domain: "cdn.example.com".to_string(),
            ..S3Config::default()
        };
        assert_eq!(
            tls.public_url("k.jpg"),
            "https://cdn.example.com/user-photos/k.jpg"
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = S3Config {
            secret_key: "super-secret".to_string(),
            ..S3Config::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_builds_without_network() {
        assert!(S3BlobStore::new(S3Config::default()).is_ok());
    }
}
