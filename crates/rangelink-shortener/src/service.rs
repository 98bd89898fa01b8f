use crate::generator::IdGenerator;
use async_trait::async_trait;
use rangelink_core::{LinkRecord, Repository, ShortCode, Shortener, ShortenerError};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and an `IdGenerator` to handle:
/// - URL validation
/// - dedup of already shortened URLs
/// - id allocation and encoding for new URLs
///
/// Dedup is lookup-then-insert with nothing serializing the two steps, so two
/// concurrent first submissions of the same URL can both insert and get
/// different codes. Each code still resolves correctly.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: G,
}

impl<R: Repository, G: IdGenerator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` that owns its repository.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_shared(Arc::new(repository), generator)
    }

    /// Creates a service over a repository shared with other nodes.
    ///
    /// Each node brings its own generator; the generators must draw from one
    /// lease source for codes to stay unique across nodes.
    pub fn with_shared(repository: Arc<R>, generator: G) -> Self {
        Self {
            repository,
            generator,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validates that the URL has a valid format (has a scheme and host).
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        };

        if rest.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }

    fn allocate(&self) -> Result<u64, ShortenerError> {
        self.generator.next_id().map_err(|e| {
            error!(error = %e, "id allocation failed");
            ShortenerError::Allocation(e.to_string())
        })
    }
}

/// Returns the part after the last `/`, so links and bare codes look alike.
fn trailing_segment(code_or_url: &str) -> &str {
    code_or_url
        .rsplit_once('/')
        .map_or(code_or_url, |(_, tail)| tail)
}

#[async_trait]
impl<R: Repository, G: IdGenerator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, long_url: &str) -> Result<ShortCode, ShortenerError> {
        Self::validate_url(long_url)?;

        if let Some(existing) = self.repository.find_by_long_url(long_url).await? {
            debug!(code = %existing.short_code, url = %long_url, "url already shortened");
            return Ok(existing.short_code);
        }

        let id = self.allocate()?;
        let record = LinkRecord::new(id, long_url);
        let code = record.short_code.clone();

        self.repository.insert(record).await?;

        debug!(id, code = %code, url = %long_url, "shortened url");
        Ok(code)
    }

    async fn resolve(&self, code_or_url: &str) -> Result<Option<String>, ShortenerError> {
        let segment = trailing_segment(code_or_url);

        let Ok(code) = ShortCode::parse(segment) else {
            trace!(input = %code_or_url, "no well-formed short code in input");
            return Ok(None);
        };

        match self.repository.find_by_short_code(&code).await? {
            Some(record) => {
                trace!(code = %code, url = %record.long_url, "resolved short code");
                Ok(Some(record.long_url))
            }
            None => {
                trace!(code = %code, "short code not found");
                Ok(None)
            }
        }
    }
}
