use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::domain::UNKNOWN_AUTHOR;

use super::platform::Platform;

/// Per-platform author attribution. Best-effort: every failure path is
/// `None`, mapped to the `Unknown` sentinel by the caller. Resolution must
/// never abort a scan.
pub trait ResolveAuthor {
    fn resolve(&self, element: &ElementRef) -> Option<String>;
}

pub fn resolver_for(platform: Platform) -> &'static dyn ResolveAuthor {
    match platform {
        Platform::Youtube => &YoutubeResolver,
        Platform::Reddit => &RedditResolver,
        Platform::X => &XResolver,
        Platform::Generic => &GenericResolver,
    }
}

pub fn resolve_author(platform: Platform, element: &ElementRef) -> String {
    resolver_for(platform)
        .resolve(element)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// Nearest ancestor (the element itself included) matching the predicate.
fn closest<'a>(
    el: &ElementRef<'a>,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    if pred(el) {
        return Some(*el);
    }
    el.ancestors().filter_map(ElementRef::wrap).find(pred)
}

fn first_text(container: &ElementRef, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
}

struct YoutubeResolver;

static YT_AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#author-text").expect("static selector"));
static YT_HEADING_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3 a").expect("static selector"));
static YT_CHANNEL_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href*='/channel/'], a[href*='/@']").expect("static selector")
});

impl ResolveAuthor for YoutubeResolver {
    fn resolve(&self, element: &ElementRef) -> Option<String> {
        let renderer = closest(element, |el| {
            matches!(
                el.value().name(),
                "ytd-comment-view-model" | "ytd-comment-renderer"
            )
        })?;
        let name = first_text(&renderer, &YT_AUTHOR)
            .or_else(|| first_text(&renderer, &YT_HEADING_LINK))
            .or_else(|| first_text(&renderer, &YT_CHANNEL_LINK))?;
        let name = name.trim_start_matches('@').to_string();
        (!name.is_empty()).then_some(name)
    }
}

struct RedditResolver;

static REDDIT_AUTHOR_EL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".author, [data-testid='comment_author_link'], a[href*='/user/']")
        .expect("static selector")
});
static USER_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/user/([^/?#]+)").expect("static regex"));

impl ResolveAuthor for RedditResolver {
    fn resolve(&self, element: &ElementRef) -> Option<String> {
        // Modern Reddit carries the author directly on the comment element.
        if let Some(shreddit) = closest(element, |el| el.value().name() == "shreddit-comment") {
            if let Some(author) = shreddit.value().attr("author") {
                let author = author.trim();
                if !author.is_empty() {
                    return Some(normalize_reddit_name(author));
                }
            }
        }

        // Old Reddit and test-id based layouts.
        let block = closest(element, |el| {
            el.value().attr("data-testid") == Some("comment")
                || el.value().classes().any(|c| c == "Comment")
                || (el.value().classes().any(|c| c == "thing")
                    && el.value().classes().any(|c| c == "comment"))
        })?;
        let author_el = block.select(&REDDIT_AUTHOR_EL).next()?;
        let mut name = author_el.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            if let Some(href) = author_el.value().attr("href") {
                if let Some(captures) = USER_HREF.captures(href) {
                    name = captures[1].to_string();
                }
            }
        }
        (!name.is_empty()).then(|| normalize_reddit_name(&name))
    }
}

fn normalize_reddit_name(name: &str) -> String {
    if name.starts_with("u/") {
        name.to_string()
    } else {
        format!("u/{name}")
    }
}

struct XResolver;

static X_USER_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-testid='User-Name']").expect("static selector"));
static X_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("static selector"));
static X_SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("static selector"));

impl ResolveAuthor for XResolver {
    fn resolve(&self, element: &ElementRef) -> Option<String> {
        let tweet = closest(element, |el| el.value().name() == "article")?;
        let container = tweet.select(&X_USER_NAME).next()?;

        // Prefer the @handle link over the display-name span.
        for link in container.select(&X_LINK) {
            let text = link.text().collect::<String>().trim().to_string();
            if text.starts_with('@') {
                return Some(text);
            }
        }
        let display = container.select(&X_SPAN).next()?;
        let text = display.text().collect::<String>().trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

struct GenericResolver;

impl ResolveAuthor for GenericResolver {
    fn resolve(&self, _element: &ElementRef) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn resolve_first(html: &str, inner: &str, platform: Platform) -> String {
        let doc = Html::parse_document(html);
        let sel = Selector::parse(inner).unwrap();
        let el = doc.select(&sel).next().expect("fixture element");
        resolve_author(platform, &el)
    }

    #[test]
    fn youtube_author_text_strips_at_prefix() {
        let html = r#"
            <ytd-comment-renderer>
                <span id="author-text">@SomeUser</span>
                <p class="target">the comment itself</p>
            </ytd-comment-renderer>"#;
        assert_eq!(
            resolve_first(html, "p.target", Platform::Youtube),
            "SomeUser"
        );
    }

    #[test]
    fn youtube_falls_back_to_channel_link() {
        let html = r#"
            <ytd-comment-view-model>
                <a href="/channel/UC123">Channel Name</a>
                <p class="target">comment body</p>
            </ytd-comment-view-model>"#;
        assert_eq!(
            resolve_first(html, "p.target", Platform::Youtube),
            "Channel Name"
        );
    }

    #[test]
    fn youtube_without_renderer_ancestor_is_unknown() {
        let html = r#"<div><p class="target">orphan comment</p></div>"#;
        assert_eq!(
            resolve_first(html, "p.target", Platform::Youtube),
            UNKNOWN_AUTHOR
        );
    }

    #[test]
    fn reddit_prefers_shreddit_author_attribute() {
        let html = r#"
            <shreddit-comment author="bob">
                <div class="md"><p class="target">reddit comment</p></div>
            </shreddit-comment>"#;
        assert_eq!(resolve_first(html, "p.target", Platform::Reddit), "u/bob");
    }

    #[test]
    fn reddit_legacy_author_link_text() {
        let html = r#"
            <div class="thing comment">
                <a class="author" href="/user/alice">alice</a>
                <p class="target">legacy reddit comment</p>
            </div>"#;
        assert_eq!(resolve_first(html, "p.target", Platform::Reddit), "u/alice");
    }

    #[test]
    fn reddit_parses_name_from_href_when_text_empty() {
        let html = r#"
            <div data-testid="comment">
                <a href="/user/carol?sort=top"></a>
                <p class="target">another reddit comment</p>
            </div>"#;
        assert_eq!(resolve_first(html, "p.target", Platform::Reddit), "u/carol");
    }

    #[test]
    fn reddit_does_not_double_prefix() {
        let html = r#"
            <div class="Comment">
                <a class="author">u/dave</a>
                <p class="target">prefixed name comment</p>
            </div>"#;
        assert_eq!(resolve_first(html, "p.target", Platform::Reddit), "u/dave");
    }

    #[test]
    fn x_prefers_handle_link_over_display_name() {
        let html = r#"
            <article>
                <div data-testid="User-Name">
                    <span>Display Name</span>
                    <a href="/display">Display Name</a>
                    <a href="/handle"><span>@handle</span></a>
                </div>
                <div data-testid="tweetText" class="target">tweet text</div>
            </article>"#;
        assert_eq!(resolve_first(html, ".target", Platform::X), "@handle");
    }

    #[test]
    fn x_display_name_when_no_handle_link() {
        let html = r#"
            <article>
                <div data-testid="User-Name"><span>Just A Name</span></div>
                <div class="target">tweet text</div>
            </article>"#;
        assert_eq!(resolve_first(html, ".target", Platform::X), "Just A Name");
    }

    #[test]
    fn generic_is_always_unknown() {
        let html = r#"<article><p class="target">some text</p></article>"#;
        assert_eq!(
            resolve_first(html, "p.target", Platform::Generic),
            UNKNOWN_AUTHOR
        );
    }
}
