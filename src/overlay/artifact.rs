use std::collections::HashMap;
use std::fmt::Write;

use ego_tree::{NodeId, NodeRef};
use scraper::Node;

use crate::{config::Theme, domain::ScanSession, page::Page};

use super::badge::Badge;
use super::highlight::{severity_class, Annotation};
use super::report::render_modal;
use super::styles::{
    stylesheet, BADGE_ID, BORDER_ATTR, COLOR_ATTR, INDEX_ATTR, MODAL_ID, OVERLAY_ID, STYLE_ID,
    TOOLTIP_ATTR, TOOLTIP_ID,
};
use super::{escape_attr, escape_html};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children must be emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

struct Chrome {
    style: String,
    body_extra: String,
}

/// Serializes the page with severity classes, tooltip data attributes, and
/// ordinal cross-references merged onto the annotated elements, plus the
/// injected stylesheet, badge, report modal, and interaction script.
pub fn render_annotated(
    page: &Page,
    annotations: &[Annotation],
    session: &ScanSession,
    theme: Theme,
) -> String {
    let chrome = Chrome {
        style: stylesheet(theme),
        body_extra: body_extra(annotations, session),
    };
    render(page, annotations, Some(&chrome))
}

/// Serializes the page untouched. Re-emitting a page that was never
/// annotated (or was cleared) goes through here, so clearing is idempotent
/// by construction.
pub fn render_clean(page: &Page) -> String {
    render(page, &[], None)
}

fn render(page: &Page, annotations: &[Annotation], chrome: Option<&Chrome>) -> String {
    let by_node: HashMap<NodeId, &Annotation> =
        annotations.iter().map(|a| (a.node, a)).collect();
    let mut out = String::new();
    for child in page.document().tree.root().children() {
        write_node(child, &by_node, chrome, &mut out, false);
    }
    out
}

fn write_node(
    node: NodeRef<Node>,
    annotations: &HashMap<NodeId, &Annotation>,
    chrome: Option<&Chrome>,
    out: &mut String,
    raw_text: bool,
) {
    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                write_node(child, annotations, chrome, out, raw_text);
            }
        }
        Node::Doctype(doctype) => {
            let _ = write!(out, "<!DOCTYPE {}>", doctype.name());
        }
        Node::Comment(comment) => {
            let _ = write!(out, "<!--{}-->", &comment.comment);
        }
        Node::Text(text) => {
            if raw_text {
                out.push_str(&text.text);
            } else {
                out.push_str(&escape_html(&text.text));
            }
        }
        Node::Element(element) => {
            let name = element.name();
            out.push('<');
            out.push_str(name);

            let annotation = annotations.get(&node.id()).copied();
            let mut wrote_class = false;
            for (attr, value) in element.attrs() {
                if attr == "class" {
                    if let Some(a) = annotation {
                        let _ = write!(
                            out,
                            r#" class="{} {}""#,
                            escape_attr(value),
                            severity_class(a.severity)
                        );
                        wrote_class = true;
                        continue;
                    }
                }
                let _ = write!(out, r#" {}="{}""#, attr, escape_attr(value));
            }
            if let Some(a) = annotation {
                if !wrote_class {
                    let _ = write!(out, r#" class="{}""#, severity_class(a.severity));
                }
                let _ = write!(
                    out,
                    r#" {INDEX_ATTR}="{}" {TOOLTIP_ATTR}="{}" {COLOR_ATTR}="{}" {BORDER_ATTR}="{}""#,
                    a.ordinal,
                    escape_attr(&a.tooltip.text),
                    a.tooltip.color,
                    escape_attr(a.tooltip.border)
                );
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&name) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&name);
            for child in node.children() {
                write_node(child, annotations, chrome, out, raw);
            }

            if let Some(chrome) = chrome {
                if name == "head" {
                    let _ = write!(
                        out,
                        r#"<style id="{STYLE_ID}">{}</style>"#,
                        chrome.style
                    );
                } else if name == "body" {
                    out.push_str(&chrome.body_extra);
                }
            }

            let _ = write!(out, "</{name}>");
        }
        Node::ProcessingInstruction(_) => {}
    }
}

fn body_extra(annotations: &[Annotation], session: &ScanSession) -> String {
    let mut extra = format!(r#"<div id="{TOOLTIP_ID}"></div>"#);
    if let Some(badge) = Badge::from_session(session) {
        extra.push_str(&badge.to_html());
    }
    extra.push_str(&render_modal(session));
    if !annotations.is_empty() {
        let _ = write!(extra, "<script>{}</script>", interaction_script());
    }
    extra
}

const SCRIPT_TEMPLATE: &str = r#"(function () {
  var GAP = __GAP__, MARGIN = __MARGIN__;
  var tip = document.getElementById("__TOOLTIP_ID__");
  function showTip(el) {
    if (!tip) return;
    var text = el.getAttribute("__TOOLTIP_ATTR__");
    if (!text) return;
    tip.textContent = text;
    tip.style.color = el.getAttribute("__COLOR_ATTR__") || "";
    tip.style.borderColor = el.getAttribute("__BORDER_ATTR__") || "";
    tip.style.opacity = "1";
    var rect = el.getBoundingClientRect();
    var tipRect = tip.getBoundingClientRect();
    var top = rect.top - tipRect.height - GAP;
    var left = rect.left + rect.width / 2 - tipRect.width / 2;
    if (top < MARGIN) top = rect.bottom + GAP;
    if (left < MARGIN) left = MARGIN;
    if (left + tipRect.width > window.innerWidth - MARGIN) {
      left = window.innerWidth - tipRect.width - MARGIN;
    }
    tip.style.top = top + "px";
    tip.style.left = left + "px";
  }
  function hideTip() {
    if (tip) { tip.style.opacity = "0"; tip.style.pointerEvents = "none"; }
  }
  document.querySelectorAll("[__TOOLTIP_ATTR__]").forEach(function (el) {
    el.addEventListener("mouseenter", function () { showTip(el); });
    el.addEventListener("mouseleave", hideTip);
  });

  var overlay = document.getElementById("__OVERLAY_ID__");
  var modal = document.getElementById("__MODAL_ID__");
  var open = false;
  function onKey(e) { if (e.key === "Escape") closeModal(); }
  function openModal() {
    if (!overlay || !modal || open) return;
    open = true;
    overlay.style.display = "block";
    modal.style.display = "flex";
    requestAnimationFrame(function () {
      overlay.classList.add("ts-visible");
      modal.classList.add("ts-visible");
      requestAnimationFrame(function () {
        modal.querySelectorAll(".ts-cat-bar-fill").forEach(function (bar) {
          bar.style.width = bar.getAttribute("data-width") + "%";
        });
      });
    });
    document.addEventListener("keydown", onKey);
  }
  function closeModal() {
    if (!open) return;
    open = false;
    overlay.classList.remove("ts-visible");
    modal.classList.remove("ts-visible");
    overlay.style.display = "none";
    modal.style.display = "none";
    document.removeEventListener("keydown", onKey);
  }
  var badge = document.getElementById("__BADGE_ID__");
  if (badge) badge.addEventListener("click", openModal);
  if (overlay) overlay.addEventListener("click", closeModal);
  if (modal) {
    var closeBtn = modal.querySelector(".ts-modal-close");
    if (closeBtn) closeBtn.addEventListener("click", closeModal);
    modal.querySelectorAll("[__REF_ATTR__]").forEach(function (row) {
      row.addEventListener("click", function () {
        closeModal();
        var target = document.querySelector(
          "[__INDEX_ATTR__='" + row.getAttribute("__REF_ATTR__") + "']"
        );
        if (target) target.scrollIntoView({ behavior: "smooth", block: "center" });
      });
    });
  }
})();"#;

fn interaction_script() -> String {
    SCRIPT_TEMPLATE
        .replace("__GAP__", "8")
        .replace("__MARGIN__", "4")
        .replace("__TOOLTIP_ID__", TOOLTIP_ID)
        .replace("__TOOLTIP_ATTR__", TOOLTIP_ATTR)
        .replace("__COLOR_ATTR__", COLOR_ATTR)
        .replace("__BORDER_ATTR__", BORDER_ATTR)
        .replace("__INDEX_ATTR__", INDEX_ATTR)
        .replace("__REF_ATTR__", super::styles::REF_ATTR)
        .replace("__OVERLAY_ID__", OVERLAY_ID)
        .replace("__MODAL_ID__", MODAL_ID)
        .replace("__BADGE_ID__", BADGE_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassificationResult, Severity, ToxicityScores};
    use crate::overlay::highlight::build_annotations;
    use crate::scan::session::merge;
    use crate::scan::{extract::CommentExtractor, extract::element_text};
    use crate::config::ScanConfig;
    use crate::domain::CommentEntry;

    fn scan_config() -> ScanConfig {
        ScanConfig {
            default_threshold: 0.5,
            min_text_len: 10,
            max_text_len: 1000,
        }
    }

    fn classified(severity: Severity) -> ClassificationResult {
        ClassificationResult {
            text: String::new(),
            author: None,
            scores: ToxicityScores {
                insult: 0.9,
                ..Default::default()
            },
            is_toxic: severity.is_flagged(),
            severity: Some(severity),
            flagged_categories: 1,
        }
    }

    fn annotated_page() -> (Page, Vec<CommentEntry>) {
        let page = Page::parse(
            r#"<html><head><title>t</title></head><body>
                <div class="comment-body">You are an idiot, honestly.</div>
                <div class="comment-body">Have a nice day, friend!</div>
            </body></html>"#,
            None,
        );
        let entries: Vec<CommentEntry> = {
            let extractor = CommentExtractor::new(&scan_config());
            extractor
                .extract(&page)
                .iter()
                .map(|el| CommentEntry {
                    node: el.id(),
                    text: element_text(el),
                    author: "Unknown".to_string(),
                })
                .collect()
        };
        (page, entries)
    }

    #[test]
    fn annotated_output_carries_classes_and_ordinals() {
        let (page, entries) = annotated_page();
        let session = merge(
            &entries,
            vec![classified(Severity::Toxic), classified(Severity::Safe)],
        );
        let annotations = build_annotations(&entries, &session);
        let html = render_annotated(&page, &annotations, &session, Theme::Dark);

        assert!(html.contains(r#"class="comment-body toxscan-toxic""#));
        assert!(html.contains(r#"class="comment-body toxscan-safe""#));
        assert!(html.contains(&format!("{INDEX_ATTR}=\"0\"")));
        assert!(html.contains(&format!("{INDEX_ATTR}=\"1\"")));
        assert!(html.contains(STYLE_ID));
        assert!(html.contains(BADGE_ID));
        assert!(html.contains("1 toxic comment found"));
        assert!(html.contains("insult (90%)"));
    }

    #[test]
    fn clean_output_has_no_annotation_residue() {
        let (page, _) = annotated_page();
        let html = render_clean(&page);
        assert!(!html.contains("toxscan-"));
        assert!(!html.contains(INDEX_ATTR));
        assert!(html.contains("You are an idiot, honestly."));
    }

    #[test]
    fn text_nodes_are_escaped_but_script_bodies_are_not() {
        let page = Page::parse(
            r#"<html><head><script>if (a < b) { go(); }</script></head><body><p>a &amp; b</p></body></html>"#,
            None,
        );
        let html = render_clean(&page);
        assert!(html.contains("if (a < b) { go(); }"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn void_elements_are_not_closed() {
        let page = Page::parse(
            r#"<html><head></head><body><img src="x.png"><br></body></html>"#,
            None,
        );
        let html = render_clean(&page);
        assert!(html.contains(r#"<img src="x.png">"#));
        assert!(!html.contains("</img>"));
    }
}
