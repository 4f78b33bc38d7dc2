/// Payment-network reference appended to most narrations. Carries no
/// meaning for budgeting, so it and everything after it is dropped.
pub const END_TO_END_MARKER: &str = " End-to-End-Ref.: ";

/// Cut the end-to-end reference, collapse whitespace runs to a single space
/// and trim.
pub fn normalize(raw: &str) -> String {
    let collapsed = strip_reference(raw)
        .split_ascii_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    // a marker behind a tab or newline only shows up once collapsed
    strip_reference(&collapsed).to_string()
}

fn strip_reference(text: &str) -> &str {
    match text.find(END_TO_END_MARKER) {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}

/// Case-insensitive `strip_prefix`. Returns the byte length of the matched
/// prefix in `text`, which may differ from `prefix.len()` when case folding
/// changes the encoded width.
pub(crate) fn match_prefix_ignore_case(text: &str, prefix: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    let mut end = 0;

    for p in prefix.chars() {
        let (idx, t) = text_chars.next()?;
        if !t.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
        end = idx + t.len_utf8();
    }

    Some(end)
}

/// Byte range of the last case-insensitive occurrence of `needle` in `text`.
pub(crate) fn rfind_ignore_case(text: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    text.char_indices().rev().find_map(|(start, _)| {
        match_prefix_ignore_case(&text[start..], needle).map(|len| (start, start + len))
    })
}
