// Monthly top-post archive harvesting, the corpus's second source

use crate::client::{HarvesterConfig, archive_headers, build_client};
use crate::error::{HarvestError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const TOP_LIST_SIZE: usize = 100;
const LISTING_PAGE_SIZE: u32 = 10;
// Paragraph kind carrying plain text; everything else is media or embeds.
const TEXT_PARAGRAPH: u32 = 1;

/// A harvested archive post, exported per month next to the topic stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivePost {
    pub id: String,
    #[serde(rename = "creatorId")]
    pub author: String,
    #[serde(rename = "detectedLanguage")]
    pub lang: String,
    #[serde(rename = "uniqueSlug")]
    pub slug: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub text: String,
}

// Wire-format envelopes. The archive wraps everything in {"payload": ...};
// decoding is strict so schema drift surfaces as a decode error instead of
// a misharvested corpus.

#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    payload: ListingPayload,
}

#[derive(Debug, Deserialize)]
struct ListingPayload {
    value: Vec<PostSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostSummary {
    id: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    unique_slug: String,
    #[serde(default)]
    detected_language: String,
    creator: Creator,
}

#[derive(Debug, Deserialize)]
struct Creator {
    username: String,
}

#[derive(Debug, Deserialize)]
struct PostEnvelope {
    payload: PostPayload,
}

#[derive(Debug, Deserialize)]
struct PostPayload {
    value: PostDetail,
}

#[derive(Debug, Deserialize)]
struct PostDetail {
    content: Option<PostContent>,
    virtuals: Option<Virtuals>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostContent {
    body_model: BodyModel,
}

#[derive(Debug, Deserialize)]
struct BodyModel {
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Deserialize)]
struct Paragraph {
    #[serde(rename = "type")]
    kind: u32,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Virtuals {
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    slug: String,
}

impl ArchivePost {
    fn from_summary(summary: PostSummary) -> Self {
        let slug = if summary.unique_slug.is_empty() {
            // Older posts lack the unique slug; derive one the same way the
            // archive's own permalinks do.
            let derived = format!("{}-{}", summary.slug, summary.id);
            debug!("no unique slug, derived {}", derived);
            derived
        } else {
            summary.unique_slug
        };

        Self {
            id: summary.id,
            author: summary.creator.username,
            lang: summary.detected_language,
            slug,
            tags: Vec::new(),
            text: String::new(),
        }
    }
}

/// The archive's JSON endpoints prefix every body with an XSSI guard string;
/// everything before the first brace is armor, not payload.
fn strip_xssi_prefix(body: &str) -> &str {
    match body.find('{') {
        Some(ix) => &body[ix..],
        None => body,
    }
}

/// Harvests the archive's monthly "top posts" listings.
pub struct ArchiveHarvester {
    client: Client,
    config: HarvesterConfig,
}

impl ArchiveHarvester {
    pub fn new(config: HarvesterConfig) -> Self {
        let client = build_client(&config);
        Self { client, config }
    }

    /// Harvest one month: the listing, then the full text of every English
    /// post in it.
    pub async fn harvest_month(&self, month: &str) -> Result<Vec<ArchivePost>> {
        info!("fetching top posts for {}", month);
        let mut posts = self.fetch_top_posts(month).await?;
        for post in posts.iter_mut() {
            self.fetch_post_text(post).await?;
        }
        Ok(posts)
    }

    /// Page through a month's listing until the top-list size is reached or
    /// the archive stops returning posts. Every fetched id goes into the
    /// ignore list of the next page request, which is how the endpoint
    /// paginates.
    pub async fn fetch_top_posts(&self, month: &str) -> Result<Vec<ArchivePost>> {
        let mut fetched_ids: Vec<String> = Vec::new();
        let mut posts = Vec::new();

        while fetched_ids.len() < TOP_LIST_SIZE {
            let page = self.fetch_listing_page(month, &fetched_ids).await?;
            if page.is_empty() {
                break;
            }
            debug!("got {} posts", page.len());

            for summary in page {
                fetched_ids.push(summary.id.clone());
                // The downstream classifier is trained on English text only.
                if summary.detected_language == "en" {
                    posts.push(ArchivePost::from_summary(summary));
                }
            }
        }

        Ok(posts)
    }

    async fn fetch_listing_page(
        &self,
        month: &str,
        ignore: &[String],
    ) -> Result<Vec<PostSummary>> {
        let url = self.listing_url(month)?;
        let raw = self
            .client
            .post(url)
            .headers(archive_headers(&self.config))
            .json(&serde_json::json!({ "count": LISTING_PAGE_SIZE, "ignore": ignore }))
            .send()
            .await?
            .text()
            .await?;

        let envelope: ListingEnvelope = serde_json::from_str(strip_xssi_prefix(&raw))?;
        Ok(envelope.payload.value)
    }

    /// Fetch a post's full text and tag slugs. A post whose payload carries
    /// no content keeps its empty text; that happens for deleted or paywalled
    /// posts and is not worth failing the month over.
    pub async fn fetch_post_text(&self, post: &mut ArchivePost) -> Result<()> {
        let url = self.post_url(post)?;
        let raw = self
            .client
            .get(url.clone())
            .headers(archive_headers(&self.config))
            .send()
            .await?
            .text()
            .await?;

        let envelope: PostEnvelope = serde_json::from_str(strip_xssi_prefix(&raw))?;
        let detail = envelope.payload.value;

        let Some(content) = detail.content else {
            warn!("no content for post {}", url);
            return Ok(());
        };

        post.text = content
            .body_model
            .paragraphs
            .iter()
            .filter(|p| p.kind == TEXT_PARAGRAPH)
            .map(|p| p.text.as_str())
            .collect();

        if let Some(virtuals) = detail.virtuals {
            post.tags = virtuals.tags.into_iter().map(|t| t.slug).collect();
        }

        Ok(())
    }

    fn listing_url(&self, month: &str) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.config.archive_url)
            .map_err(|e| HarvestError::InvalidUrl(format!("Invalid archive URL: {}", e)))?;
        url.set_path(&format!("/top-100/{}/load-more", month));
        Ok(url)
    }

    fn post_url(&self, post: &ArchivePost) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.config.archive_url)
            .map_err(|e| HarvestError::InvalidUrl(format!("Invalid archive URL: {}", e)))?;
        url.set_path(&format!("/@{}/{}", post.author, post.slug));
        url.set_query(Some("format=json"));
        Ok(url)
    }
}
