use super::HintFilter;
use crate::unicode::{is_close_paren, is_corner_quote, is_open_paren};

/// Normalize a raw mantra for reading:
/// corner quotes removed, ideographic spaces turned into line breaks,
/// bracket spans dropped, and parentheses whose content mentions a
/// pronunciation keyword dropped. Other parentheses (index markers, glosses)
/// stay. Runs of spaces collapse to one and blank lines are squeezed out.
pub fn clean_mantra(text: &str, filter: &HintFilter) -> String {
    let chars: Vec<char> = text
        .chars()
        .filter(|&c| !is_corner_quote(c))
        .map(|c| if c == '\u{3000}' { '\n' } else { c })
        .collect();

    let mut stripped = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '[' {
            if let Some(offset) = chars[i + 1..].iter().position(|&c| c == ']') {
                i += offset + 2;
                continue;
            }
        } else if is_open_paren(c) {
            if let Some(offset) = chars[i + 1..].iter().position(|&c| is_close_paren(c)) {
                let close = i + 1 + offset;
                let inner: String = chars[i + 1..close].iter().collect();
                if filter.is_hint_removable(&inner) {
                    i = close + 1;
                    continue;
                }
            }
        }
        stripped.push(c);
        i += 1;
    }

    let lines: Vec<String> = stripped
        .split('\n')
        .map(collapse_spaces)
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n").trim().to_string()
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_space = false;
    for c in line.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}
