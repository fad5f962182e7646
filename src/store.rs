//! Object store access behind a mockable trait.
//!
//! The edit loop needs four bucket operations: paginated listing, content
//! download, content-type retrieval and content upload. The [`ObjectStore`]
//! trait captures exactly those; [`S3Store`] implements it against AWS S3
//! using the SDK's standard credential discovery. Test suites use the
//! generated `MockObjectStore` instead of a live bucket.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::ProvideCredentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use thiserror::Error;
use tracing::debug;

/// Store failures, split the way the caller needs to report them:
/// credential problems end the run with a dedicated message, everything
/// else is surfaced with the failing bucket attached by the walker.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to resolve store credentials: {0}")]
    Credentials(String),

    #[error("{0}")]
    Service(String),
}

/// One page of a bucket listing.
#[derive(Debug, Clone)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    /// Opaque continuation cursor for the next page; `None` on the final page.
    pub next_cursor: Option<String>,
}

/// Bucket operations used by the edit loop.
///
/// Implementors must be `Send + Sync`; the trait is annotated for `mockall`
/// so tests can script listings and verify upload calls deterministically.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of object keys, passing the previous page's cursor
    /// (or `None` for the first page).
    async fn list_page(
        &self,
        bucket: &str,
        cursor: Option<String>,
    ) -> Result<ObjectPage, StoreError>;

    /// Fetch an object's full content.
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Fetch an object's current content-type from its metadata.
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite an object, setting the content-type explicitly when given
    /// so the store does not fall back to a generic default.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<(), StoreError>;
}

/// S3-backed implementation of [`ObjectStore`].
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Builds a client from the environment's standard credential chain.
    ///
    /// Credentials are resolved eagerly so a misconfigured environment is
    /// reported before any listing starts, not on the first request.
    pub async fn new_from_env() -> Result<Self, StoreError> {
        let region_provider = RegionProviderChain::default_provider().or_else("us-east-1");
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let provider = config.credentials_provider().ok_or_else(|| {
            StoreError::Credentials("no credentials provider configured".to_string())
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| StoreError::Credentials(e.to_string()))?;
        debug!("Resolved store credentials");

        Ok(Self {
            client: aws_sdk_s3::Client::new(&config),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        bucket: &str,
        cursor: Option<String>,
    ) -> Result<ObjectPage, StoreError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(cursor)
            .send()
            .await
            .map_err(service_error)?;

        let keys = response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();

        Ok(ObjectPage {
            keys,
            next_cursor: response.next_continuation_token().map(str::to_string),
        })
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(service_error)?;
        let body = response.body.collect().await.map_err(service_error)?;
        Ok(body.into_bytes().to_vec())
    }

    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>, StoreError> {
        let response = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(service_error)?;
        Ok(response.content_type().map(str::to_string))
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(service_error)?;
        Ok(())
    }
}

fn service_error<E>(err: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::Service(DisplayErrorContext(err).to_string())
}
