//! Deterministic word-wrap over an approximate width model.
//!
//! The base-14 fonts ship no metrics with the file, so line breaking uses a
//! fixed per-character width table instead of real glyph advances. The table
//! errs wide: a wrapped line may end a little early but never overruns the
//! box it was wrapped for, which is the property the layout engine needs.
//! The same model is used for centering and right-alignment offsets, so all
//! positioning stays self-consistent.

/// Points to millimetres (1 pt = 1/72 inch).
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Approximate advance of one character, in ems of the current font size.
fn char_factor(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '!' | '|' | '.' | ',' | ';' | ':' => 0.30,
        ' ' | 'f' | 't' | 'r' | '-' | '(' | ')' | '[' | ']' | '"' => 0.38,
        'm' | 'w' | 'M' | 'W' | '@' | '\u{2014}' => 0.88,
        'A'..='L' | 'N'..='V' | 'X'..='Z' | '0'..='9' => 0.66,
        _ => 0.52,
    }
}

/// Estimated width of `text` at `size` points, in millimetres.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(char_factor).sum::<f32>() * size * PT_TO_MM
}

/// Greedy word wrap of `text` to lines at most `max_width` mm wide at
/// `size` points.
///
/// Words wider than a whole line are hard-split at the character that
/// overflows. Empty input yields no lines.
pub fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if text_width(word, size) > max_width {
            // Flush, then split the oversized word across lines.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                if !current.is_empty() && text_width(&current, size) + text_width(&c.to_string(), size) > max_width {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
            continue;
        }

        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap text that may already contain newlines; each source line wraps
/// independently and blank source lines are dropped.
pub fn wrap_lines(text: &str, size: f32, max_width: f32) -> Vec<String> {
    text.lines()
        .flat_map(|line| wrap(line, size, max_width))
        .collect()
}
