use scraper::{Html, Node, Selector};
use std::sync::OnceLock;

const TABLE_SELECTOR: &str = "table";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td, th";

static TABLE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static ROW_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static CELL_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &'static str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("table selectors are valid CSS selectors"))
}

/// Extracts the visible text of an HTML document, decoding entities.
///
/// Text inside `<script>` and `<style>` is dropped. Plain-text input passes through
/// with its line structure intact.
pub fn html_to_text(content: &str) -> String {
    let document = Html::parse_document(content);
    let mut out = String::with_capacity(content.len());

    for node in document.tree.root().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element())
                .map_or(false, |el| matches!(el.name(), "script" | "style"));
            if !hidden {
                out.push_str(text);
            }
        }
    }

    out
}

/// Normalizes bulletin text for single-line pattern matching: non-breaking spaces
/// become spaces, stray `Â` mojibake is removed and whitespace runs collapse.
pub fn normalize_bulletin_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| c != 'Â')
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .collect();
    crate::utils::collapse_whitespace(&cleaned)
}

/// Drops control and invisible format characters, keeping line breaks and tabs.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\n' | '\r' | '\t') || !is_control_or_format(c))
        .collect()
}

fn is_control_or_format(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{00ad}' | '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}'
        )
}

/// Returns the text of every table row with at least two cells.
///
/// Each cell's text fragments are trimmed and concatenated; cells are joined with a
/// single space.
pub fn table_rows(content: &str) -> Vec<String> {
    let document = Html::parse_document(content);
    let tables = selector(&TABLE_SELECTOR_CACHED, TABLE_SELECTOR);
    let rows = selector(&ROW_SELECTOR_CACHED, ROW_SELECTOR);
    let cells = selector(&CELL_SELECTOR_CACHED, CELL_SELECTOR);

    let mut out = Vec::new();
    for table in document.select(tables) {
        for row in table.select(rows) {
            let texts: Vec<String> = row
                .select(cells)
                .map(|cell| cell.text().map(str::trim).collect::<String>())
                .collect();
            if texts.len() < 2 {
                continue;
            }
            out.push(texts.join(" "));
        }
    }
    out
}
