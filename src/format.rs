use pulldown_cmark::{html, Parser};

/// One formatted response, produced entirely on the worker thread.
/// `markdown` is the normalized, block-quoted text the result view
/// renders; `html` is the standalone document the copy action exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDocument {
    pub markdown: String,
    pub html: String,
}

/// Normalizes "•" bullets to markdown bullets and prefixes every line
/// with a block-quote marker. Line order and content are otherwise
/// preserved.
pub fn normalize(raw: &str) -> String {
    let bulleted = raw.replace('•', "* ");
    let mut quoted = String::with_capacity(bulleted.len());
    for (i, line) in bulleted.lines().enumerate() {
        if i > 0 {
            quoted.push('\n');
        }
        quoted.push_str("> ");
        quoted.push_str(line);
    }
    quoted
}

pub fn render(raw: &str) -> ResultDocument {
    let markdown = normalize(raw);
    let mut html = String::new();
    html::push_html(&mut html, Parser::new(&markdown));
    ResultDocument { markdown, html }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_become_list_items() {
        let doc = render("추천 주제:\n• 발효\n• 효소");
        assert!(doc.html.contains("<blockquote>"));
        assert!(doc.html.contains("<li>발효</li>"));
        assert!(doc.html.contains("<li>효소</li>"));
        assert!(!doc.html.contains('•'));
        assert!(!doc.markdown.contains('•'));
    }

    #[test]
    fn every_line_is_block_quoted() {
        assert_eq!(normalize("one\ntwo\nthree"), "> one\n> two\n> three");
    }

    #[test]
    fn normalize_is_idempotent_on_bullet_free_input() {
        let once = "already * normalized".replace('•', "* ");
        assert_eq!(once.replace('•', "* "), once);
    }

    #[test]
    fn empty_input_is_total() {
        let doc = render("");
        assert_eq!(doc.markdown, "");
        assert_eq!(doc.html, "");
    }

    #[test]
    fn plain_text_round_trips_through_blockquote() {
        let doc = render("hello world");
        assert_eq!(doc.markdown, "> hello world");
        assert!(doc.html.contains("<blockquote>"));
        assert!(doc.html.contains("hello world"));
    }
}
