// Markdown rendering for note previews
//
// A deliberately small, line-oriented subset: headings, emphasis, links,
// inline code, fenced code blocks, flat lists and paragraphs.
use crate::domain::html::Html;
use regex::Regex;
use std::sync::LazyLock;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```([\s\S]*?)```").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- (.+)$").unwrap());
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\. (.+)$").unwrap());

// Applied in order; bold-italic before bold before italic.
static INLINE_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"(?mi)^### (.*)$", "<h3>${1}</h3>"),
        (r"(?mi)^## (.*)$", "<h2>${1}</h2>"),
        (r"(?mi)^# (.*)$", "<h1>${1}</h1>"),
        (r"\*\*\*(.+?)\*\*\*", "<strong><em>${1}</em></strong>"),
        (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        (r"\*(.+?)\*", "<em>${1}</em>"),
        (r"___(.+?)___", "<strong><em>${1}</em></strong>"),
        (r"__(.+?)__", "<strong>${1}</strong>"),
        (r"_(.+?)_", "<em>${1}</em>"),
        (
            r"\[(.+?)\]\((.+?)\)",
            r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
        ),
        (r"`(.+?)`", "<code>${1}</code>"),
    ])
});

// Drops empty paragraphs and the <p>/<br> noise left around block elements.
static CLEANUP_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"<p></p>", ""),
        (r"<p>(<[houp])", "${1}"),
        (r"(</[houp][^>]*>)</p>", "${1}"),
        (r"(<[uo]l>)<br>", "${1}"),
        (r"<br>(</[uo]l>)", "${1}"),
        (r"</li><br><li>", "</li><li>"),
        (r"(<pre>)<br>", "${1}"),
        (r"<br>(</pre>)", "${1}"),
    ])
});

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules.iter().fold(text, |acc, (regex, replacement)| {
        regex.replace_all(&acc, *replacement).into_owned()
    })
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn code_placeholder(index: usize) -> String {
    format!("\u{1}CODEBLOCK{index}\u{1}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

fn group_lists(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut open: Option<ListKind> = None;

    for line in text.split('\n') {
        let item = if let Some(caps) = UNORDERED_ITEM.captures(line) {
            Some((ListKind::Unordered, caps[1].to_string()))
        } else {
            ORDERED_ITEM
                .captures(line)
                .map(|caps| (ListKind::Ordered, caps[1].to_string()))
        };

        match item {
            Some((kind, content)) => {
                if open != Some(kind) {
                    if let Some(previous) = open.take() {
                        lines.push(previous.close_tag().to_string());
                    }
                    lines.push(kind.open_tag().to_string());
                    open = Some(kind);
                }
                lines.push(format!("<li>{content}</li>"));
            }
            None => {
                if let Some(previous) = open.take() {
                    lines.push(previous.close_tag().to_string());
                }
                lines.push(line.to_string());
            }
        }
    }

    if let Some(previous) = open {
        lines.push(previous.close_tag().to_string());
    }

    lines.join("\n")
}

pub fn render_markdown(text: &str) -> Html {
    let text = text.trim();
    if text.is_empty() {
        return Html::default();
    }

    let mut code_blocks = Vec::new();
    let text = CODE_BLOCK.replace_all(text, |caps: &regex::Captures| {
        let placeholder = code_placeholder(code_blocks.len());
        code_blocks.push(caps[1].trim().to_string());
        placeholder
    });

    let html = apply(&INLINE_RULES, escape_text(&text));
    let mut html = group_lists(&html)
        .replace("\n\n", "</p><p>")
        .replace('\n', "<br>");

    for (index, code) in code_blocks.iter().enumerate() {
        let block = format!("<pre><code>{}</code></pre>", escape_text(code));
        html = html.replacen(&code_placeholder(index), &block, 1);
    }

    Html::new(apply(&CLEANUP_RULES, format!("<p>{html}</p>")))
}
