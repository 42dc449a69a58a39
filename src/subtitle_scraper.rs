/*!
 * Subtitle retrieval for a single video.
 *
 * `SubtitleScraper` ties the pieces together: it obtains the watch-page markup,
 * finds the caption manifest, selects a track for the requested language, downloads
 * that track and parses it. "No captions" outcomes produce empty results plus a
 * diagnostic; only configuration and transport failures are returned as errors.
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::app_config::Config;
use crate::caption_manifest::{self, CaptionTrackRef};
use crate::diagnostics::{self, Diagnostic, DiagnosticSink, NoopSink};
use crate::errors::{CaptionLookupError, ScraperError};
use crate::providers::{HttpPageSource, PageSource};
use crate::transcript_parser::{self, SubtitleEntry};
use crate::video_page;

/// Title, description and subtitles of one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub description: String,
    pub subtitles: Vec<SubtitleEntry>,
}

/// Rewrites the watch-page URL before it is fetched
///
/// Returning `None`, an empty string or something that is not an absolute URL is a
/// configuration error for the request.
#[async_trait]
pub trait ProxyRewrite: Send + Sync {
    async fn rewrite(&self, url: &str) -> Option<String>;
}

/// Adapter turning a synchronous closure into a `ProxyRewrite`
pub struct FnProxy<F>(pub F);

#[async_trait]
impl<F> ProxyRewrite for FnProxy<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    async fn rewrite(&self, url: &str) -> Option<String> {
        (self.0)(url)
    }
}

/// Parameters of one subtitle request
#[derive(Clone, Default)]
pub struct SubtitleRequest {
    /// Video id, or a URL containing one
    pub video_id: String,
    /// Requested language; the configured default when absent
    pub lang: Option<String>,
    /// Page markup to use instead of fetching the watch page
    pub page_markup: Option<String>,
    /// Transcript URL to download instead of consulting the manifest
    pub track_url: Option<String>,
    /// Rewrites the watch-page URL before it is fetched
    pub proxy: Option<Arc<dyn ProxyRewrite>>,
}

impl fmt::Debug for SubtitleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtitleRequest")
            .field("video_id", &self.video_id)
            .field("lang", &self.lang)
            .field("page_markup", &self.page_markup.as_ref().map(|m| m.len()))
            .field("track_url", &self.track_url)
            .field("proxy", &self.proxy.is_some())
            .finish()
    }
}

impl SubtitleRequest {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            ..Default::default()
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn page_markup(mut self, markup: impl Into<String>) -> Self {
        self.page_markup = Some(markup.into());
        self
    }

    pub fn track_url(mut self, url: impl Into<String>) -> Self {
        self.track_url = Some(url.into());
        self
    }

    pub fn proxy(mut self, proxy: Arc<dyn ProxyRewrite>) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Use a synchronous closure as the proxy rewrite
    pub fn proxy_fn<F>(self, rewrite: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.proxy(Arc::new(FnProxy(rewrite)))
    }
}

/// Retrieves and normalizes subtitles through a page source
pub struct SubtitleScraper<S: PageSource = HttpPageSource> {
    config: Config,
    source: S,
    sink: Arc<dyn DiagnosticSink>,
}

impl SubtitleScraper<HttpPageSource> {
    /// Create a scraper that fetches over HTTP
    pub fn from_config(config: Config) -> Result<Self, ScraperError> {
        config
            .validate()
            .map_err(|e| ScraperError::Config(e.to_string()))?;
        let source = HttpPageSource::new(&config)?;
        Ok(Self::new(config, source))
    }
}

impl<S: PageSource> SubtitleScraper<S> {
    pub fn new(config: Config, source: S) -> Self {
        Self {
            config,
            source,
            sink: Arc::new(NoopSink),
        }
    }

    /// Report recoverable conditions to `sink` in addition to the log
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Subtitles for the requested language
    ///
    /// Returns an empty list when the video has no usable captions. A direct
    /// `track_url` bypasses manifest selection, but the page is still resolved so
    /// that an unusable video id or proxy fails the same way in every entry point.
    pub async fn fetch_subtitles(
        &self,
        request: &SubtitleRequest,
    ) -> Result<Vec<SubtitleEntry>, ScraperError> {
        let markup = self.resolve_markup(request).await?;
        self.subtitles_from(&markup, request).await
    }

    /// Title, description and subtitles for the requested language
    ///
    /// Missing meta tags fall back to the configured placeholders.
    pub async fn fetch_video_details(
        &self,
        request: &SubtitleRequest,
    ) -> Result<VideoDetails, ScraperError> {
        let markup = self.resolve_markup(request).await?;

        let title = video_page::extract_title(&markup)
            .unwrap_or_else(|| self.config.title_placeholder.clone());
        let description = video_page::extract_description(&markup)
            .unwrap_or_else(|| self.config.description_placeholder.clone());
        let subtitles = self.subtitles_from(&markup, request).await?;

        Ok(VideoDetails {
            title,
            description,
            subtitles,
        })
    }

    /// Caption tracks advertised by the page, empty when there are none
    pub async fn list_tracks(
        &self,
        request: &SubtitleRequest,
    ) -> Result<Vec<CaptionTrackRef>, ScraperError> {
        let markup = self.resolve_markup(request).await?;

        match caption_manifest::extract_caption_tracks(&markup) {
            Ok(tracks) => {
                debug!(
                    "Page advertises tracks: {:?}",
                    caption_manifest::available_languages(&tracks)
                );
                Ok(tracks)
            }
            Err(e) => {
                self.report(e);
                Ok(Vec::new())
            }
        }
    }

    fn language_for<'a>(&'a self, request: &'a SubtitleRequest) -> &'a str {
        request
            .lang
            .as_deref()
            .unwrap_or(&self.config.default_language)
    }

    async fn resolve_markup<'a>(
        &self,
        request: &'a SubtitleRequest,
    ) -> Result<Cow<'a, str>, ScraperError> {
        if let Some(markup) = &request.page_markup {
            return Ok(Cow::Borrowed(markup.as_str()));
        }

        let video_id = video_page::extract_video_id(&request.video_id).ok_or_else(|| {
            ScraperError::Config(format!("Invalid video id: '{}'", request.video_id))
        })?;

        let mut url = self.config.watch_url(&video_id);
        if let Some(proxy) = &request.proxy {
            url = proxy
                .rewrite(&url)
                .await
                .filter(|rewritten| !rewritten.trim().is_empty())
                .ok_or_else(|| {
                    ScraperError::Config("Proxy did not produce a page URL".to_string())
                })?;
            url::Url::parse(&url).map_err(|e| {
                ScraperError::Config(format!("Proxy produced an invalid URL '{}': {}", url, e))
            })?;
        }

        let markup = self.source.fetch_text(&url).await?;
        Ok(Cow::Owned(markup))
    }

    async fn subtitles_from(
        &self,
        markup: &str,
        request: &SubtitleRequest,
    ) -> Result<Vec<SubtitleEntry>, ScraperError> {
        let track_url = match &request.track_url {
            Some(url) => Some(url.clone()),
            None => self.locate_track(markup, self.language_for(request)),
        };

        self.download(track_url.as_deref()).await
    }

    fn locate_track(&self, markup: &str, lang: &str) -> Option<String> {
        let located = caption_manifest::extract_caption_tracks(markup).and_then(|tracks| {
            caption_manifest::select_track(&tracks, lang)
                .map(|track| track.usable_url().unwrap_or_default().to_string())
        });

        match located {
            Ok(url) => {
                debug!("Selected caption track for '{}': {}", lang, url);
                Some(url)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    async fn download(&self, track_url: Option<&str>) -> Result<Vec<SubtitleEntry>, ScraperError> {
        let Some(url) = track_url else {
            return Ok(Vec::new());
        };

        let document = self.source.fetch_text(url).await?;
        Ok(transcript_parser::parse_transcript_with(&document, self.sink.as_ref()))
    }

    fn report(&self, error: CaptionLookupError) {
        diagnostics::emit(self.sink.as_ref(), Diagnostic::from(error));
    }
}
