//! Object storage access through OpenDAL's S3 backend.

use opendal::{Operator, services};
use thiserror::Error;

const TRACING_TARGET: &str = "guestbook_infra::storage";

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Overrides the derived public base URL, for CDN fronts or
    /// S3-compatible stores.
    pub public_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend init failed: {0}")]
    Init(String),
    #[error("object write failed: {0}")]
    Write(String),
}

/// Uploads media objects and knows their public URLs.
#[derive(Clone)]
pub struct MediaStorage {
    operator: Operator,
    bucket: String,
    public_url: Option<String>,
}

impl MediaStorage {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut builder = services::S3::default()
            .bucket(&config.bucket)
            .region(&config.region);

        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint(endpoint);
        }
        if let Some(ref access_key) = config.access_key {
            builder = builder.access_key_id(access_key);
        }
        if let Some(ref secret_key) = config.secret_key {
            builder = builder.secret_access_key(secret_key);
        }

        let operator = Operator::new(builder)
            .map(|op| op.finish())
            .map_err(|e| StorageError::Init(e.to_string()))?;

        Ok(Self {
            operator,
            bucket: config.bucket.clone(),
            public_url: config.public_url.clone().map(|url| {
                url.trim_end_matches('/').to_owned()
            }),
        })
    }

    /// Writes the object and returns its public URL.
    pub async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size = data.len(),
            "Uploading object"
        );

        self.operator
            .write_with(key, data)
            .content_type(content_type)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;

        Ok(self.url_for(key))
    }

    pub fn url_for(&self, key: &str) -> String {
        match &self.public_url {
            Some(base) => format!("{base}/{key}"),
            None => format!("https://{}.s3.amazonaws.com/{key}", self.bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig {
            bucket: "wedding-media".to_owned(),
            region: "ap-southeast-1".to_owned(),
            endpoint: None,
            access_key: Some("key".to_owned()),
            secret_key: Some("secret".to_owned()),
            public_url: None,
        }
    }

    #[test]
    fn default_urls_point_at_the_bucket_host() {
        let storage = MediaStorage::new(&config()).unwrap();

        assert_eq!(
            storage.url_for("image/abc-dance.jpg"),
            "https://wedding-media.s3.amazonaws.com/image/abc-dance.jpg"
        );
    }

    #[test]
    fn public_url_override_replaces_the_bucket_host() {
        let mut config = config();
        config.public_url = Some("https://cdn.example.com/".to_owned());
        let storage = MediaStorage::new(&config).unwrap();

        assert_eq!(
            storage.url_for("video/toast.mp4"),
            "https://cdn.example.com/video/toast.mp4"
        );
    }
}
