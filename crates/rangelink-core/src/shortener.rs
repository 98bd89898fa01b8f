use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short code for `long_url`, creating one if the URL has not
    /// been shortened before.
    ///
    /// Only `http` and `https` URLs are accepted; anything else fails with
    /// [`ShortenerError::InvalidUrl`](crate::ShortenerError::InvalidUrl).
    async fn shorten(&self, long_url: &str) -> Result<ShortCode>;

    /// Resolves a bare short code, or a link whose last path segment is one,
    /// to its long URL. Returns `None` if nothing is stored under that code.
    async fn resolve(&self, code_or_url: &str) -> Result<Option<String>>;
}
