//! ANSI terminal rendering of a [`UIViewModel`].
//!
//! Everything is drawn into a `String` so the caller decides where it goes
//! (stdout in the CLI, an assertion in tests). Layout, top to bottom:
//!
//! ```text
//!                           News Search
//! ──────────────────────────────────────────────────────────────
//!  [경제] > ai_
//!    1 ai news  (42)                    <- dropdown, when open
//!  › 2 ai chips
//!  Popular: #경제 #정치 ...
//!  Recent:  ai · rust
//! ──────────────────────────────────────────────────────────────
//!  "ai" (경제): 42 results (page 1 of 5) · Search time: 12ms
//!  <cards>
//!          [1] 2 3 … 5  next ›
//! ──────────────────────────────────────────────────────────────
//!            :page N  :next  :prev  :cat NAME  :quit
//! ```

use crate::app::pagination::PageWindow;
use crate::ui::present::Segment;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, ResultCard, ResultsSummary, ResultsView, SearchBarInfo,
    SuggestionItem, UIViewModel,
};
use std::fmt::Write;

/// Renders the whole view model for a terminal `cols` columns wide.
#[must_use]
pub fn render(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    render_header(&mut out, &vm.header, theme, cols);
    render_border(&mut out, &theme.colors.border, cols);
    render_search_bar(&mut out, &vm.search_bar, theme);
    if let Some(items) = &vm.suggestions {
        render_suggestions(&mut out, items, theme);
    }
    render_tag_line(&mut out, "Popular", &vm.popular, "#", theme);
    render_tag_line(&mut out, "Recent", &vm.history, "", theme);
    render_border(&mut out, &theme.colors.border, cols);
    render_results(&mut out, &vm.results, theme);
    if let Some(window) = &vm.pagination {
        out.push_str(&pagination_line(window));
        out.push('\n');
    }
    render_border(&mut out, &theme.colors.border, cols);
    render_footer(&mut out, &vm.footer, theme, cols);

    out
}

/// Plain-text pagination controls with one-based labels.
///
/// ```
/// use findy::app::pagination::compute_window;
/// use findy::ui::terminal::pagination_line;
///
/// let window = compute_window(5, 20, 2).unwrap();
/// assert_eq!(pagination_line(&window), " ‹ prev  1 … 4 5 [6] 7 8 … 20  next ›");
/// ```
#[must_use]
pub fn pagination_line(window: &PageWindow) -> String {
    let mut labels = vec![];
    if window.show_first {
        labels.push("1".to_string());
    }
    if window.show_leading_ellipsis {
        labels.push("…".to_string());
    }
    for &page in &window.pages {
        if page == window.current {
            labels.push(format!("[{}]", page + 1));
        } else {
            labels.push((page + 1).to_string());
        }
    }
    if window.show_trailing_ellipsis {
        labels.push("…".to_string());
    }
    if window.show_last {
        labels.push(window.total.to_string());
    }

    let prev = if window.has_previous { "‹ prev" } else { "      " };
    let next = if window.has_next { "next ›" } else { "" };
    format!(" {prev}  {}  {next}", labels.join(" ")).trim_end().to_string()
}

fn centered(text: &str, cols: usize) -> (usize, usize) {
    let len = text.chars().count().min(cols);
    let left = cols.saturating_sub(len) / 2;
    (left, cols.saturating_sub(left + len))
}

fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let (left, right) = centered(&header.title, cols);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    let _ = write!(out, "{}{}{}", " ".repeat(left), header.title, " ".repeat(right));
    out.push_str(Theme::reset());
    out.push('\n');
}

fn render_border(out: &mut String, color: &str, cols: usize) {
    let _ = writeln!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
}

fn render_search_bar(out: &mut String, bar: &SearchBarInfo, theme: &Theme) {
    let category = if bar.category.is_empty() { "전체" } else { bar.category.as_str() };
    let _ = writeln!(
        out,
        " {}[{category}]{} {}>{} {}{}_{}",
        Theme::fg(&theme.colors.text_dim),
        Theme::reset(),
        Theme::fg(&theme.colors.search_bar_border),
        Theme::reset(),
        Theme::fg(&theme.colors.text_normal),
        bar.input,
        Theme::reset(),
    );
}

/// Writes segments, restoring `base` styling after every highlight.
fn push_segments(out: &mut String, segments: &[Segment], theme: &Theme, base: &str) {
    for segment in segments {
        if segment.highlighted {
            out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
            out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
            out.push_str(&segment.text);
            out.push_str(Theme::reset());
            out.push_str(base);
        } else {
            out.push_str(&segment.text);
        }
    }
}

fn render_suggestions(out: &mut String, items: &[SuggestionItem], theme: &Theme) {
    if items.is_empty() {
        let _ = writeln!(
            out,
            "   {}(no suggestions){}",
            Theme::fg(&theme.colors.text_dim),
            Theme::reset()
        );
        return;
    }

    for (index, item) in items.iter().enumerate() {
        let base = if item.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        };

        let marker = if item.is_selected { '›' } else { ' ' };
        let _ = write!(out, " {marker} {}{base}", index + 1);
        out.push(' ');
        if item.is_selected {
            // selection colors win over match colors
            out.push_str(&item.value);
        } else {
            push_segments(out, &item.segments, theme, &base);
        }
        out.push_str(Theme::reset());
        if let Some(count) = item.count {
            let _ = write!(out, "  {}({count}){}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        }
        out.push('\n');
    }
}

fn render_tag_line(out: &mut String, label: &str, values: &[String], prefix: &str, theme: &Theme) {
    if values.is_empty() {
        return;
    }
    let tags: Vec<String> = values.iter().map(|value| format!("{prefix}{value}")).collect();
    let _ = writeln!(
        out,
        " {}{label}:{} {}{}{}",
        Theme::fg(&theme.colors.text_dim),
        Theme::reset(),
        Theme::fg(&theme.colors.tag_fg),
        tags.join(" · "),
        Theme::reset(),
    );
}

fn render_results(out: &mut String, results: &ResultsView, theme: &Theme) {
    match results {
        ResultsView::Idle => {}
        ResultsView::Loading { title } => {
            let _ = writeln!(
                out,
                " {}Searching for {title}...{}",
                Theme::fg(&theme.colors.text_dim),
                Theme::reset()
            );
        }
        ResultsView::Validation(empty) | ResultsView::NoResults(empty) => {
            render_empty_state(out, empty, &theme.colors.empty_state_fg, theme);
        }
        ResultsView::Error(empty) => render_empty_state(out, empty, &theme.colors.error_fg, theme),
        ResultsView::Results { summary, cards } => {
            render_summary(out, summary, theme);
            for card in cards {
                out.push('\n');
                render_card(out, card, theme);
            }
            out.push('\n');
        }
    }
}

fn render_empty_state(out: &mut String, empty: &EmptyState, color: &str, theme: &Theme) {
    let _ = writeln!(out, " {}{}{}{}", Theme::bold(), Theme::fg(color), empty.message, Theme::reset());
    if !empty.subtitle.is_empty() {
        let _ = writeln!(
            out,
            " {}{}{}",
            Theme::fg(&theme.colors.text_dim),
            empty.subtitle,
            Theme::reset()
        );
    }
}

fn render_summary(out: &mut String, summary: &ResultsSummary, theme: &Theme) {
    let _ = writeln!(
        out,
        " {}{}: {} results (page {} of {}) · Search time: {}ms{}",
        Theme::fg(&theme.colors.text_dim),
        summary.title,
        summary.total_count,
        summary.current_page,
        summary.total_pages,
        summary.elapsed_ms,
        Theme::reset(),
    );
}

fn render_card(out: &mut String, card: &ResultCard, theme: &Theme) {
    let title_base = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    out.push(' ');
    out.push_str(&title_base);
    push_segments(out, &card.title, theme, &title_base);
    out.push_str(Theme::reset());
    out.push('\n');

    if !card.body.is_empty() {
        let body_base = Theme::fg(&theme.colors.text_normal);
        out.push(' ');
        out.push_str(&body_base);
        push_segments(out, &card.body, theme, &body_base);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    if !card.meta.is_empty() {
        let _ = writeln!(
            out,
            " {}{}{}",
            Theme::fg(&theme.colors.text_dim),
            card.meta.join(" | "),
            Theme::reset()
        );
    }
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().map(|tag| format!("#{tag}")).collect();
        let _ = writeln!(out, " {}{}{}", Theme::fg(&theme.colors.tag_fg), tags.join(" "), Theme::reset());
    }
    if !card.url.is_empty() {
        let _ = writeln!(
            out,
            " {}{}{}{}",
            Theme::underline(),
            Theme::fg(&theme.colors.link_fg),
            card.url,
            Theme::reset()
        );
    }
}

fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let (left, _) = centered(&footer.keybindings, cols);
    let _ = writeln!(
        out,
        "{}{}{}{}{}",
        " ".repeat(left),
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        footer.keybindings,
        Theme::reset()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pagination::compute_window;
    use crate::ui::viewmodel::ResultCard;

    /// Drops escape sequences so assertions read like the screen.
    fn strip_ansi(text: &str) -> String {
        let pattern = regex::Regex::new("\u{1b}\\[[0-9;]*m").unwrap();
        pattern.replace_all(text, "").into_owned()
    }

    fn viewmodel(results: ResultsView) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: "News Search".to_string(),
                dark_mode: false,
            },
            search_bar: SearchBarInfo {
                input: "ai".to_string(),
                category: "경제".to_string(),
                categories: vec![String::new(), "경제".to_string()],
            },
            suggestions: None,
            popular: vec!["경제".to_string(), "AI".to_string()],
            history: vec![],
            results,
            pagination: None,
            footer: FooterInfo {
                keybindings: ":quit".to_string(),
            },
        }
    }

    #[test]
    fn pagination_line_at_edges() {
        let first = compute_window(0, 3, 2).unwrap();
        assert_eq!(pagination_line(&first), "         [1] 2 3  next ›");

        let last = compute_window(2, 3, 2).unwrap();
        assert_eq!(pagination_line(&last), " ‹ prev  1 2 [3]");
    }

    #[test]
    fn renders_summary_and_cards() {
        let vm = viewmodel(ResultsView::Results {
            summary: ResultsSummary {
                title: "\"ai\" (경제)".to_string(),
                total_count: 42,
                current_page: 1,
                total_pages: 5,
                elapsed_ms: 12,
            },
            cards: vec![ResultCard {
                title: vec![Segment::marked("AI"), Segment::plain(" boom")],
                body: vec![Segment::plain("Chips sell out")],
                url: "https://news.example/1".to_string(),
                meta: vec!["경제".to_string(), "Kim".to_string()],
                tags: vec!["chips".to_string()],
            }],
        });

        let screen = strip_ansi(&render(&vm, &Theme::default(), 40));
        assert!(screen.contains("[경제] > ai_"));
        assert!(screen.contains("Popular: #경제 · #AI"));
        assert!(screen.contains("\"ai\" (경제): 42 results (page 1 of 5) · Search time: 12ms"));
        assert!(screen.contains(" AI boom\n"));
        assert!(screen.contains("경제 | Kim"));
        assert!(screen.contains("#chips"));
        assert!(!screen.contains("Recent:"));
    }

    #[test]
    fn highlighted_segments_use_match_colors() {
        let theme = Theme::default();
        let mut out = String::new();
        push_segments(&mut out, &[Segment::marked("ai")], &theme, "");
        assert!(out.starts_with(&Theme::fg(&theme.colors.match_highlight_fg)));
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_suggestion_is_marked() {
        let mut vm = viewmodel(ResultsView::Idle);
        vm.suggestions = Some(vec![
            SuggestionItem {
                value: "ai news".to_string(),
                segments: vec![Segment::marked("ai"), Segment::plain(" news")],
                count: Some(3),
                is_selected: false,
            },
            SuggestionItem {
                value: "ai chips".to_string(),
                segments: vec![Segment::marked("ai"), Segment::plain(" chips")],
                count: None,
                is_selected: true,
            },
        ]);

        let screen = strip_ansi(&render(&vm, &Theme::default(), 40));
        assert!(screen.contains("   1 ai news  (3)\n"));
        assert!(screen.contains(" › 2 ai chips\n"));
    }

    #[test]
    fn empty_states_show_message_and_subtitle() {
        let vm = viewmodel(ResultsView::NoResults(EmptyState {
            message: "No results for \"zzz\".".to_string(),
            subtitle: "Try a different search term.".to_string(),
        }));
        let screen = strip_ansi(&render(&vm, &Theme::default(), 40));
        assert!(screen.contains(" No results for \"zzz\".\n Try a different search term.\n"));
    }
}
