//! Rule-based URL taxonomy classifier.
//!
//! `classify_source` is total: every input (including empty or garbage
//! strings) maps to exactly one `SourceType`. The decision list is ordered
//! and first-match-wins; reordering it changes results.

use serde::{Deserialize, Serialize};
use url::Url;

/// Closed taxonomy of institutional source categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Government,
    AcademicInstitution,
    Encyclopedia,
    SocialMediaPlatform,
    SocialMediaPlatformVideo,
    SocialMediaChannelCreator,
    SocialBloggingPlatform,
    SocialBloggingPlatformUserPub,
    ResearchPublication,
    NewsMediaMainstream,
    NewsOpinionBlogLive,
    NgoNonprofitPublication,
    NgoNonprofitOrganization,
    NgoNonprofitGeneral,
    CorporateBlogPrInfo,
    NewsMediaOtherOrBlog,
    WebsiteGeneral,
    UnknownUrl,
    UnknownOther,
    UnknownErrorParsing,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Government => "government",
            SourceType::AcademicInstitution => "academic_institution",
            SourceType::Encyclopedia => "encyclopedia",
            SourceType::SocialMediaPlatform => "social_media_platform",
            SourceType::SocialMediaPlatformVideo => "social_media_platform_video",
            SourceType::SocialMediaChannelCreator => "social_media_channel_creator",
            SourceType::SocialBloggingPlatform => "social_blogging_platform",
            SourceType::SocialBloggingPlatformUserPub => "social_blogging_platform_user_pub",
            SourceType::ResearchPublication => "research_publication",
            SourceType::NewsMediaMainstream => "news_media_mainstream",
            SourceType::NewsOpinionBlogLive => "news_opinion_blog_live",
            SourceType::NgoNonprofitPublication => "ngo_nonprofit_publication",
            SourceType::NgoNonprofitOrganization => "ngo_nonprofit_organization",
            SourceType::NgoNonprofitGeneral => "ngo_nonprofit_general",
            SourceType::CorporateBlogPrInfo => "corporate_blog_pr_info",
            SourceType::NewsMediaOtherOrBlog => "news_media_other_or_blog",
            SourceType::WebsiteGeneral => "website_general",
            SourceType::UnknownUrl => "unknown_url",
            SourceType::UnknownOther => "unknown_other",
            SourceType::UnknownErrorParsing => "unknown_error_parsing",
        }
    }

    /// Every taxonomy member, for table seeding and exhaustiveness checks.
    pub const ALL: &'static [SourceType] = &[
        SourceType::Government,
        SourceType::AcademicInstitution,
        SourceType::Encyclopedia,
        SourceType::SocialMediaPlatform,
        SourceType::SocialMediaPlatformVideo,
        SourceType::SocialMediaChannelCreator,
        SourceType::SocialBloggingPlatform,
        SourceType::SocialBloggingPlatformUserPub,
        SourceType::ResearchPublication,
        SourceType::NewsMediaMainstream,
        SourceType::NewsOpinionBlogLive,
        SourceType::NgoNonprofitPublication,
        SourceType::NgoNonprofitOrganization,
        SourceType::NgoNonprofitGeneral,
        SourceType::CorporateBlogPrInfo,
        SourceType::NewsMediaOtherOrBlog,
        SourceType::WebsiteGeneral,
        SourceType::UnknownUrl,
        SourceType::UnknownOther,
        SourceType::UnknownErrorParsing,
    ];
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------------------------------------
// Domain/keyword tables (shared with the perspective fallback)
// ------------------------------------------------------------

pub(crate) const KNOWN_SOCIAL_MEDIA_PLATFORMS: &[&str] = &[
    "x.com",
    "twitter.com",
    "instagram.com",
    "tiktok.com",
    "youtube.com",
    "youtu.be",
    "facebook.com",
    "reddit.com",
    "linkedin.com",
    "pinterest.com",
    "tumblr.com",
    "medium.com",
    "quora.com",
    "threads.net",
];

pub(crate) const KNOWN_MAINSTREAM_NEWS_DOMAINS: &[&str] = &[
    "nytimes.com",
    "bbc.com",
    "cnn.com",
    "reuters.com",
    "apnews.com",
    "washingtonpost.com",
    "wsj.com",
    "theguardian.com",
    "npr.org",
    "abcnews.go.com",
    "cbsnews.com",
    "nbcnews.com",
    "foxnews.com",
    "usatoday.com",
    "bloomberg.com",
    "forbes.com",
    "news.google.com",
    "cnbc.com",
    "politico.com",
    "axios.com",
    "theatlantic.com",
    "newyorker.com",
    "time.com",
    "latimes.com",
    "chicagotribune.com",
    "chron.com",
];

pub(crate) const KNOWN_ACADEMIC_PUBLISHERS: &[&str] = &[
    "arxiv.org",
    "pubmed.ncbi.nlm.nih.gov",
    "nature.com",
    "sciencemag.org",
    "jamanetwork.com",
    "thelancet.com",
    "ieee.org",
    "acm.org",
    "springer.com",
    "elsevier.com",
    "wiley.com",
    "sagepub.com",
    "jstor.org",
    "plos.org",
    "frontiersin.org",
    "bmj.com",
    "cell.com",
];

pub(crate) const ALTERNATIVE_KEYWORDS: &[&str] = &[
    "conspiracy",
    "truth",
    "alternative",
    "freedom",
    "patriot",
    "liberty",
    "exposed",
    "reveal",
    "scandal",
    "coverup",
    "natural news",
    "infowars",
    "shocking",
    "they don't want you to know",
    "banned",
    "censored",
    "holistic approach",
    "natural immunity",
    "medical freedom",
    "health freedom",
    "suppressed science",
    "the real story",
    "unreported",
    "controversial study",
    "uncensored",
    "deep state",
    "globalist",
    "great reset",
    "agenda 21",
    "agenda 2030",
    "plandemic",
    "scamdemic",
    "big pharma",
    "big tech",
    "hidden",
    "secret",
    "they lied",
];

/// Reserved medium.com path sections; a first segment outside this list is
/// treated as an author/publication slug.
const MEDIUM_RESERVED_SECTIONS: &[&str] = &[
    "search",
    "tag",
    "topic",
    "collections",
    "about",
    "jobs",
    "policy",
    "help",
    "settings",
    "explore",
    "me",
    "new-story",
];

const NGO_PUBLICATION_PATHS: &[&str] = &[
    "/blog", "/news", "/press", "/report", "/briefing", "/article", "/story",
];

const NGO_NAME_KEYWORDS: &[&str] = &[
    "foundation",
    "institute",
    "society",
    "association",
    "charity",
    "trust",
    "fund",
    "council",
    "union",
];

const CORPORATE_PATHS: &[&str] = &[
    "/blog",
    "/press-release",
    "/newsroom",
    "/insights",
    "/pr/",
    "/investors",
    "/company/about",
    "/about-us",
    "/corporate",
];

const ARTICLE_PATHS: &[&str] = &["/news/", "/article/", "/story/", "/post/", "/views/"];

const ARTICLE_TLDS: &[&str] = &[
    ".com", ".net", ".info", ".co", ".online", ".io", ".news", ".press", ".report", ".blog",
];

const GENERAL_TLDS: &[&str] = &[
    ".com", ".net", ".biz", ".info", ".org", ".co", ".io", ".app", ".site", ".online", ".me",
    ".tv", ".news", ".blog", ".press", ".report",
];

// ------------------------------------------------------------
// Classifier
// ------------------------------------------------------------

/// Classify a URL into the source taxonomy. Never panics; empty input is
/// `unknown_url`, input that cannot be parsed as a URL at all is
/// `unknown_error_parsing`.
pub fn classify_source(raw_url: &str) -> SourceType {
    if raw_url.trim().is_empty() {
        return SourceType::UnknownUrl;
    }

    // Bare "example.com/x" inputs are common in provider payloads; retry
    // with an https scheme before giving up.
    let parsed = Url::parse(raw_url)
        .or_else(|_| Url::parse(&format!("https://{}", raw_url.trim())));
    let url = match parsed {
        Ok(u) => u,
        Err(_) => return SourceType::UnknownErrorParsing,
    };

    let mut host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if let Some(stripped) = host.strip_prefix("www.") {
        host = stripped.to_string();
    }
    let path = url.path().to_ascii_lowercase();

    classify_host_path(&host, &path)
}

fn classify_host_path(host: &str, path: &str) -> SourceType {
    // Government / military, including country-code variants (.gov.uk)
    if host.ends_with(".gov")
        || host.ends_with(".mil")
        || host.contains(".gov.")
        || host.contains(".mil.")
    {
        return SourceType::Government;
    }
    if host.ends_with(".edu") {
        return SourceType::AcademicInstitution;
    }
    if host.contains("wikipedia.org") {
        return SourceType::Encyclopedia;
    }

    // Social platforms, with video/creator/blogging sub-labels
    for domain in KNOWN_SOCIAL_MEDIA_PLATFORMS {
        if *domain == host || host.ends_with(&format!(".{domain}")) || host.contains(domain) {
            let is_youtube = host.contains("youtube.com") || host.contains("youtu.be");
            if is_youtube {
                if path.contains("/channel/")
                    || path.contains("/c/")
                    || path.contains("/user/")
                    || path.starts_with("/@")
                {
                    return SourceType::SocialMediaChannelCreator;
                }
                return SourceType::SocialMediaPlatformVideo;
            }
            if host.contains("medium.com") {
                return classify_medium_path(path);
            }
            return SourceType::SocialMediaPlatform;
        }
    }

    for domain in KNOWN_ACADEMIC_PUBLISHERS {
        if host.contains(domain) {
            return SourceType::ResearchPublication;
        }
    }

    for domain in KNOWN_MAINSTREAM_NEWS_DOMAINS {
        if *domain == host || host.ends_with(&format!(".{domain}")) {
            let opinionated = ["/blog", "/opinion", "/contributor", "/live/"]
                .iter()
                .any(|p| path.contains(p));
            return if opinionated {
                SourceType::NewsOpinionBlogLive
            } else {
                SourceType::NewsMediaMainstream
            };
        }
    }

    if host.ends_with(".org") {
        if NGO_PUBLICATION_PATHS.iter().any(|p| path.contains(p)) {
            return SourceType::NgoNonprofitPublication;
        }
        if NGO_NAME_KEYWORDS.iter().any(|k| host.contains(k)) {
            return SourceType::NgoNonprofitOrganization;
        }
        return SourceType::NgoNonprofitGeneral;
    }

    if CORPORATE_PATHS.iter().any(|p| path.contains(p))
        && !KNOWN_MAINSTREAM_NEWS_DOMAINS.iter().any(|d| host.contains(d))
    {
        return SourceType::CorporateBlogPrInfo;
    }

    if ARTICLE_PATHS.iter().any(|p| path.contains(p))
        && ARTICLE_TLDS.iter().any(|t| host.contains(t))
    {
        return SourceType::NewsMediaOtherOrBlog;
    }

    if GENERAL_TLDS.iter().any(|t| host.contains(t)) {
        return SourceType::WebsiteGeneral;
    }

    SourceType::UnknownOther
}

fn classify_medium_path(path: &str) -> SourceType {
    let first = path.split('/').find(|p| !p.is_empty());
    match first {
        Some(seg)
            if seg.starts_with('@')
                || (!seg.contains('.') && !MEDIUM_RESERVED_SECTIONS.contains(&seg)) =>
        {
            SourceType::SocialBloggingPlatformUserPub
        }
        _ => SourceType::SocialBloggingPlatform,
    }
}
