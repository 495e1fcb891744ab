use regex::Regex;
use std::sync::LazyLock;

static LETTERBOXD_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?letterboxd\.com/.*$").expect("hardcoded regex pattern is valid")
});

/// Whether `url` looks like a Letterboxd page URL
///
/// The scheme is optional and case-sensitive, `www.` is optional and any path
/// is accepted.
pub fn is_valid_url(url: &str) -> bool {
    LETTERBOXD_URL.is_match(url)
}

/// Page URL check for the site a client is pointed at
///
/// Same rules as [`is_valid_url`], with the host taken from the configured
/// base URL instead of `letterboxd.com`.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    pattern: Regex,
}

impl UrlValidator {
    pub fn for_base_url(base_url: &str) -> Result<Self, regex::Error> {
        let host = base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .split('/')
            .next()
            .unwrap_or_default();
        let host = host.strip_prefix("www.").unwrap_or(host);

        let pattern = Regex::new(&format!(r"^(https?://)?(www\.)?{}/.*$", regex::escape(host)))?;
        Ok(Self { pattern })
    }

    pub fn is_valid(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self {
            pattern: LETTERBOXD_URL.clone(),
        }
    }
}

/// URL of page `page` of a list: the bare URL for page 1, `<url>page/<n>/` after
pub fn paginated_url(url: &str, page: u32) -> String {
    if page <= 1 {
        return url.to_string();
    }

    if url.ends_with('/') {
        format!("{}page/{}/", url, page)
    } else {
        format!("{}/page/{}/", url, page)
    }
}
