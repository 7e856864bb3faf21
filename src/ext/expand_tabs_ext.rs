use std::borrow::Cow;

/// Replaces tabs with spaces up to the next tab stop of `tab_width` columns.
pub fn expand_tabs(line: &str, tab_width: usize) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }

    let tab_width = tab_width.max(1);
    let mut expanded = String::with_capacity(line.len() + tab_width);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let fill = tab_width - column % tab_width;
            expanded.extend(std::iter::repeat_n(' ', fill));
            column += fill;
        } else {
            expanded.push(c);
            column += 1;
        }
    }
    Cow::Owned(expanded)
}

pub trait ExpandTabsExt {
    fn expand_tabs(&self, tab_width: usize) -> Cow<'_, str>;
}

impl ExpandTabsExt for str {
    fn expand_tabs(&self, tab_width: usize) -> Cow<'_, str> {
        expand_tabs(self, tab_width)
    }
}

impl ExpandTabsExt for String {
    fn expand_tabs(&self, tab_width: usize) -> Cow<'_, str> {
        expand_tabs(self, tab_width)
    }
}
