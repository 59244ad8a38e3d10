//! HTML fragment rendering of a [`UIViewModel`].
//!
//! Produces markup for a static search page: the dropdown list, popular tags,
//! result cards and page buttons. Query matches are wrapped in `<strong>`.
//! Every piece of text from the server or the user is escaped; links are only
//! emitted for `http` and `https` URLs.

use crate::app::pagination::PageWindow;
use crate::ui::present::Segment;
use crate::ui::viewmodel::{EmptyState, ResultCard, ResultsView, SuggestionItem, UIViewModel};

/// Renders the full page body.
#[must_use]
pub fn render_page(vm: &UIViewModel) -> String {
    let mut html = String::new();
    let theme_class = if vm.header.dark_mode { "dark" } else { "light" };
    html.push_str(&format!(r#"<main class="findy {theme_class}">"#));
    html.push_str(&format!(r#"<h1>{}</h1>"#, html_escape(&vm.header.title)));

    html.push_str(r#"<form class="search-form">"#);
    html.push_str(r#"<select name="category">"#);
    for category in &vm.search_bar.categories {
        let label = if category.is_empty() { "전체" } else { category.as_str() };
        let selected = if *category == vm.search_bar.category { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            html_escape(category),
            html_escape(label)
        ));
    }
    html.push_str(r#"</select>"#);
    html.push_str(&format!(
        r#"<input type="text" name="q" value="{}" autocomplete="off">"#,
        html_escape(&vm.search_bar.input)
    ));
    if let Some(items) = &vm.suggestions {
        html.push_str(&render_suggestions(items));
    }
    html.push_str(r#"</form>"#);

    html.push_str(&render_popular(&vm.popular));
    html.push_str(&render_results(&vm.results));
    if let Some(window) = &vm.pagination {
        html.push_str(&render_pagination(window));
    }
    html.push_str(r#"</main>"#);
    html
}

/// Renders the autocomplete dropdown.
#[must_use]
pub fn render_suggestions(items: &[SuggestionItem]) -> String {
    let mut html = String::new();
    html.push_str(r#"<ul class="suggestions" role="listbox">"#);
    if items.is_empty() {
        html.push_str(r#"<li class="suggestion-empty">No suggestions</li>"#);
    }
    for (index, item) in items.iter().enumerate() {
        let class = if item.is_selected { "suggestion selected" } else { "suggestion" };
        html.push_str(&format!(
            r#"<li class="{class}" data-index="{index}" data-value="{}">{}"#,
            html_escape(&item.value),
            render_segments(&item.segments)
        ));
        if let Some(count) = item.count {
            html.push_str(&format!(r#"<span class="count">{count}</span>"#));
        }
        html.push_str(r#"</li>"#);
    }
    html.push_str(r#"</ul>"#);
    html
}

/// Renders the popular query tags; empty when there are none.
#[must_use]
pub fn render_popular(queries: &[String]) -> String {
    if queries.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<div class="popular-tags">"#);
    for query in queries {
        let escaped = html_escape(query);
        html.push_str(&format!(
            r##"<button class="tag" data-query="{escaped}">#{escaped}</button>"##
        ));
    }
    html.push_str(r#"</div>"#);
    html
}

/// Renders the results area for every state.
#[must_use]
pub fn render_results(results: &ResultsView) -> String {
    match results {
        ResultsView::Idle => String::new(),
        ResultsView::Loading { title } => format!(
            r#"<div class="loading">Searching for {}...</div>"#,
            html_escape(title)
        ),
        ResultsView::Validation(empty) => render_empty_state("validation", empty),
        ResultsView::NoResults(empty) => render_empty_state("no-results", empty),
        ResultsView::Error(empty) => render_empty_state("error", empty),
        ResultsView::Results { summary, cards } => {
            let mut html = String::from(r#"<section class="results" id="results">"#);
            html.push_str(&format!(
                r#"<p class="summary">{}: {} results (page {} of {}) · Search time: {}ms</p>"#,
                html_escape(&summary.title),
                summary.total_count,
                summary.current_page,
                summary.total_pages,
                summary.elapsed_ms
            ));
            for card in cards {
                html.push_str(&render_card(card));
            }
            html.push_str(r#"</section>"#);
            html
        }
    }
}

/// Renders page buttons with one-based labels and zero-based `data-page`.
#[must_use]
pub fn render_pagination(window: &PageWindow) -> String {
    let mut html = String::from(r#"<nav class="pagination">"#);

    let button = |page: u32, label: &str, class: &str| {
        format!(r#"<button class="{class}" data-page="{page}">{label}</button>"#)
    };

    if window.has_previous {
        html.push_str(&button(window.current - 1, "‹ prev", "prev"));
    }
    if window.show_first {
        html.push_str(&button(0, "1", "page"));
    }
    if window.show_leading_ellipsis {
        html.push_str(r#"<span class="ellipsis">…</span>"#);
    }
    for &page in &window.pages {
        let class = if page == window.current { "page current" } else { "page" };
        html.push_str(&button(page, &(page + 1).to_string(), class));
    }
    if window.show_trailing_ellipsis {
        html.push_str(r#"<span class="ellipsis">…</span>"#);
    }
    if window.show_last {
        html.push_str(&button(window.last_page(), &window.total.to_string(), "page"));
    }
    if window.has_next {
        html.push_str(&button(window.current + 1, "next ›", "next"));
    }

    html.push_str(r#"</nav>"#);
    html
}

fn render_card(card: &ResultCard) -> String {
    let mut html = String::from(r#"<article class="result-card">"#);

    let title = render_segments(&card.title);
    if is_web_url(&card.url) {
        html.push_str(&format!(
            r#"<h2><a href="{}" target="_blank" rel="noopener">{title}</a></h2>"#,
            html_escape(&card.url)
        ));
    } else {
        html.push_str(&format!(r#"<h2>{title}</h2>"#));
    }

    if !card.body.is_empty() {
        html.push_str(&format!(r#"<p class="body">{}</p>"#, render_segments(&card.body)));
    }
    if !card.meta.is_empty() {
        let meta: Vec<String> = card
            .meta
            .iter()
            .map(|part| format!(r#"<span>{}</span>"#, html_escape(part)))
            .collect();
        html.push_str(&format!(r#"<div class="meta">{}</div>"#, meta.join("")));
    }
    if !card.tags.is_empty() {
        html.push_str(r#"<div class="tags">"#);
        for tag in &card.tags {
            html.push_str(&format!(r##"<span class="tag">#{}</span>"##, html_escape(tag)));
        }
        html.push_str(r#"</div>"#);
    }

    html.push_str(r#"</article>"#);
    html
}

fn render_empty_state(class: &str, empty: &EmptyState) -> String {
    let mut html = format!(
        r#"<div class="empty-state {class}"><p>{}</p>"#,
        html_escape(&empty.message)
    );
    if !empty.subtitle.is_empty() {
        html.push_str(&format!(r#"<p class="hint">{}</p>"#, html_escape(&empty.subtitle)));
    }
    html.push_str(r#"</div>"#);
    html
}

fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.highlighted {
                format!("<strong>{}</strong>", html_escape(&segment.text))
            } else {
                html_escape(&segment.text)
            }
        })
        .collect()
}

fn is_web_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pagination::compute_window;
    use crate::ui::viewmodel::ResultsSummary;

    #[test]
    fn html_escape_special_chars() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quote\""), "&quot;quote&quot;");
    }

    #[test]
    fn highlights_become_strong_and_are_escaped() {
        let html = render_segments(&[Segment::marked("<AI>"), Segment::plain(" & more")]);
        assert_eq!(html, "<strong>&lt;AI&gt;</strong> &amp; more");
    }

    #[test]
    fn selected_suggestion_has_class() {
        let html = render_suggestions(&[SuggestionItem {
            value: "ai".to_string(),
            segments: vec![Segment::marked("ai")],
            count: Some(4),
            is_selected: true,
        }]);
        assert!(html.contains(r#"class="suggestion selected""#));
        assert!(html.contains(r#"<span class="count">4</span>"#));
    }

    #[test]
    fn pagination_buttons_carry_zero_based_pages() {
        let html = render_pagination(&compute_window(5, 20, 2).unwrap());
        assert!(html.contains(r#"<button class="page current" data-page="5">6</button>"#));
        assert!(html.contains(r#"<button class="page" data-page="19">20</button>"#));
        assert!(html.contains(r#"<button class="prev" data-page="4">‹ prev</button>"#));
        assert_eq!(html.matches("ellipsis").count(), 2);

        let first = render_pagination(&compute_window(0, 3, 2).unwrap());
        assert!(!first.contains("prev"));
    }

    #[test]
    fn non_web_urls_are_not_linked() {
        let card = ResultCard {
            title: vec![Segment::plain("title")],
            body: vec![],
            url: "javascript:alert(1)".to_string(),
            meta: vec![],
            tags: vec![],
        };
        let html = render_card(&card);
        assert!(!html.contains("href"));
        assert!(html.contains("<h2>title</h2>"));
    }

    #[test]
    fn results_render_summary_and_cards() {
        let html = render_results(&ResultsView::Results {
            summary: ResultsSummary {
                title: "\"ai\"".to_string(),
                total_count: 1,
                current_page: 1,
                total_pages: 1,
                elapsed_ms: 5,
            },
            cards: vec![ResultCard {
                title: vec![Segment::marked("AI")],
                body: vec![Segment::plain("body")],
                url: "https://news.example/1".to_string(),
                meta: vec!["경제".to_string()],
                tags: vec!["chips".to_string()],
            }],
        });
        assert!(html.contains("&quot;ai&quot;: 1 results (page 1 of 1) · Search time: 5ms"));
        assert!(html.contains(r#"<a href="https://news.example/1""#));
        assert!(html.contains("<strong>AI</strong>"));
        assert!(html.contains("#chips"));
    }

    #[test]
    fn empty_popular_renders_nothing() {
        assert!(render_popular(&[]).is_empty());
        assert!(render_popular(&["경제".to_string()]).contains(r##"data-query="경제">#경제<"##));
    }
}
