// Low-level HTML string helpers for picking a listing table apart.
// Deliberately naive: robust HTML parsing is a non-goal, and drop-list
// markup is simple tabular HTML. All matching is ASCII case-insensitive.

/// Return the markup inside the first `open_pat`...`close_pat` pair,
/// case-insensitive on tag names and attributes.
///
/// `open_pat` may be a tag prefix with attributes, e.g. `<table class="listing"`.
pub fn slice_between_ci<'a>(html: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = html.to_ascii_lowercase();
    let open_lc = open_pat.to_ascii_lowercase();
    let close_lc = close_pat.to_ascii_lowercase();

    let open_idx = lc.find(&open_lc)?;
    // Jump past the '>' of the opening tag
    let after_open = html[open_idx..].find('>')? + open_idx + 1;
    let close_idx_rel = lc[after_open..].find(&close_lc)?;
    Some(&html[after_open..after_open + close_idx_rel])
}

/// Find the next complete `open_tag`...`close_tag` block from `from` onwards.
/// Returns (start, end) byte offsets covering the whole block including tags.
pub fn next_tag_block_ci(
    html: &str,
    open_tag: &str,
    close_tag: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let lc = html.to_ascii_lowercase();
    let open_lc = open_tag.to_ascii_lowercase();
    let close_lc = close_tag.to_ascii_lowercase();

    let start = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = html[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    Some((start, open_end + end_rel + close_tag.len()))
}

/// Given a complete block like `<td ...>INNER</td>`, return INNER
/// (which may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return &block[open_end + 1..close_start];
            }
        }
    }
    ""
}

/// Drop every tag and return the concatenated text content.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Decode the handful of entities that actually show up in listing cells.
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Cell text: strip tags, decode entities, collapse whitespace.
pub fn cell_text(block: &str) -> String {
    let text = decode_entities(&strip_tags(inner_after_open_tag(block)));
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_between_case_insensitive() {
        let html = r#"<div><TABLE class="listing"><tr><td>a</td></tr></TABLE></div>"#;
        let inner = slice_between_ci(html, "<table class=\"listing\"", "</table>").unwrap();
        assert_eq!(inner, "<tr><td>a</td></tr>");
    }

    #[test]
    fn test_slice_between_missing_returns_none() {
        assert!(slice_between_ci("<p>no table</p>", "<table", "</table>").is_none());
    }

    #[test]
    fn test_next_tag_block_iteration() {
        let html = "<tr><td>one</td><td>two</td></tr>";
        let (s1, e1) = next_tag_block_ci(html, "<td", "</td>", 0).unwrap();
        assert_eq!(&html[s1..e1], "<td>one</td>");
        let (s2, e2) = next_tag_block_ci(html, "<td", "</td>", e1).unwrap();
        assert_eq!(&html[s2..e2], "<td>two</td>");
        assert!(next_tag_block_ci(html, "<td", "</td>", e2).is_none());
    }

    #[test]
    fn test_cell_text_strips_nested_markup() {
        let block = r#"<td class="dn"><a href="/x">shop&amp;go.com</a>&nbsp;</td>"#;
        assert_eq!(cell_text(block), "shop&go.com");
    }

    #[test]
    fn test_cell_text_collapses_whitespace() {
        let block = "<td>\n  1,234\n  visits </td>";
        assert_eq!(cell_text(block), "1,234 visits");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>12</b><i>34</i>"), "1234");
    }
}
