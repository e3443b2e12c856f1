use std::fmt;

/// Known comment platforms, detected from the page host. Anything
/// unrecognized falls back to Generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    Reddit,
    X,
    Generic,
}

impl Platform {
    pub fn detect(host: &str) -> Platform {
        if host.contains("youtube.com") || host.contains("youtu.be") {
            Platform::Youtube
        } else if host.contains("reddit.com") {
            Platform::Reddit
        } else if host.contains("twitter.com") || host.contains("x.com") {
            Platform::X
        } else {
            Platform::Generic
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Youtube => "youtube",
            Platform::Reddit => "reddit",
            Platform::X => "x",
            Platform::Generic => "generic",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_hosts() {
        assert_eq!(Platform::detect("www.youtube.com"), Platform::Youtube);
        assert_eq!(Platform::detect("youtu.be"), Platform::Youtube);
        assert_eq!(Platform::detect("old.reddit.com"), Platform::Reddit);
        assert_eq!(Platform::detect("twitter.com"), Platform::X);
        assert_eq!(Platform::detect("x.com"), Platform::X);
    }

    #[test]
    fn unknown_hosts_fall_back_to_generic() {
        assert_eq!(Platform::detect("news.ycombinator.com"), Platform::Generic);
        assert_eq!(Platform::detect(""), Platform::Generic);
    }
}
