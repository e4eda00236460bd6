//! Finds the line items of the `Events` section in a day page.
//!
//! The section starts at the level-2 heading anchored `Events`. Three markup
//! generations are handled:
//!
//! - `<h2><span class="mw-headline" id="Events">Events</span></h2><ul>…`
//! - `<div class="mw-heading mw-heading2"><h2 id="Events">Events</h2></div><ul>…`
//! - either of the above with the list split under level-3 subheadings
//!
//! Lists are taken from the heading's following siblings: a run of `<ul>`s,
//! optionally interleaved with level-3+ subheadings. Any other element ends the
//! section. Only the direct `<li>` children of those lists count as items.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

const SECTION_ID: &str = "Events";

static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").expect("invalid selector: h2"));

/// Visible text of each Events line item, in document order.
///
/// Whitespace runs (non-breaking spaces included) collapse to one space. A page
/// without an Events heading or list yields an empty vector.
pub fn locate_event_items(document: &Html) -> Vec<String> {
    let Some(anchor) = find_section_anchor(document) else {
        tracing::info!("no Events section found");
        return Vec::new();
    };

    let items: Vec<String> = section_lists(anchor)
        .into_iter()
        .flat_map(|ul| ul.children().filter_map(ElementRef::wrap))
        .filter(|el| el.value().name() == "li")
        .map(|li| normalize_whitespace(&element_text(li)))
        .collect();

    tracing::info!(count = items.len(), "found event item(s)");
    items
}

/// Parse `html` and locate its Events items.
pub fn locate_event_items_in(html: &str) -> Vec<String> {
    locate_event_items(&Html::parse_document(html))
}

/// The node whose following siblings make up the section: the `<h2>` itself,
/// or its `mw-heading` wrapper div.
fn find_section_anchor(document: &Html) -> Option<ElementRef<'_>> {
    let h2 = document.select(&H2).find(|h2| {
        h2.value().id() == Some(SECTION_ID)
            || h2
                .descendants()
                .filter_map(ElementRef::wrap)
                .any(|el| el.value().id() == Some(SECTION_ID))
    })?;

    let wrapper = h2
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|p| p.value().name() == "div" && has_class(*p, "mw-heading"));
    Some(wrapper.unwrap_or(h2))
}

/// `<ul>` siblings that belong to the section starting at `anchor`.
fn section_lists(anchor: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut lists = Vec::new();
    for el in anchor.next_siblings().filter_map(ElementRef::wrap) {
        if el.value().name() == "ul" {
            lists.push(el);
            continue;
        }
        match heading_level(el) {
            Some(level) if level >= 3 => continue,
            _ => break,
        }
    }
    lists
}

/// Text content with a space at every block boundary, so nested lists and
/// `<br>` never glue words together.
fn element_text(el: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if BLOCK_BOUNDARIES.contains(&e.name()) => text.push(' '),
            _ => {}
        }
    }
    text
}

const BLOCK_BOUNDARIES: &[&str] = &["br", "div", "dd", "dl", "dt", "li", "ol", "p", "ul"];

/// `Some(n)` for `<hN>` or a `mw-headingN` wrapper div.
fn heading_level(el: ElementRef<'_>) -> Option<u8> {
    let name = el.value().name();
    if let Some(level) = name
        .strip_prefix('h')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=6).contains(n))
    {
        return Some(level);
    }
    if name == "div" {
        return el
            .value()
            .classes()
            .filter_map(|c| c.strip_prefix("mw-heading"))
            .find_map(|n| n.parse::<u8>().ok());
    }
    None
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
