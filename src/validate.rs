use std::net::Ipv4Addr;

use url::{Host, Url};

const ALLOWED_SCHEMES: [&str; 12] = [
    "http", "https", "ftp", "ftps", "sftp", "ssh", "git", "irc", "rtmp", "rtmps", "rtsp", "telnet",
];

/// Outcome of checking the two user inputs before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(Url),
    MissingFields,
    InvalidUrl,
}

pub fn validate(credential: &str, url: &str) -> Validation {
    if credential.trim().is_empty() || url.trim().is_empty() {
        return Validation::MissingFields;
    }

    match parse_url(url) {
        Some(parsed) => Validation::Valid(parsed),
        None => Validation::InvalidUrl,
    }
}

/// Parses `raw` and applies the scheme and host rules. Any whitespace,
/// leading or trailing included, makes the URL invalid.
pub fn parse_url(raw: &str) -> Option<Url> {
    if raw.chars().any(char::is_whitespace) {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return None;
    }

    let valid_host = match url.host()? {
        Host::Ipv4(_) | Host::Ipv6(_) => true,
        // non-special schemes leave IPv4 hosts unparsed
        Host::Domain(domain) => domain.parse::<Ipv4Addr>().is_ok() || is_valid_domain(domain),
    };

    valid_host.then_some(url)
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    // punycode TLDs (xn--...) are allowed alongside plain alphabetic ones
    let tld = labels[labels.len() - 1];
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"));

    labels_ok && tld_ok
}
