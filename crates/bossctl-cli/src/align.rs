//! Elastic tab stops for table output.
//!
//! Consecutive lines containing tabs form a block. Within a block every
//! tab-terminated cell is padded to the widest cell of its column plus
//! `padding` spaces; the last cell of a line is written as is. Lines without
//! tabs end the block and pass through untouched.

use unicode_width::UnicodeWidthStr;

pub const PADDING: usize = 4;

pub fn align_columns(text: &str, padding: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut block: Vec<&str> = Vec::new();

    for line in text.split_inclusive('\n') {
        if line.contains('\t') {
            block.push(line);
        } else {
            flush(&mut block, padding, &mut out);
            out.push_str(line);
        }
    }
    flush(&mut block, padding, &mut out);
    out
}

fn flush(block: &mut Vec<&str>, padding: usize, out: &mut String) {
    if block.is_empty() {
        return;
    }

    let rows: Vec<(Vec<&str>, &str)> = block
        .iter()
        .map(|line| {
            let (body, newline) = match line.strip_suffix('\n') {
                Some(body) => (body, "\n"),
                None => (*line, ""),
            };
            (body.split('\t').collect(), newline)
        })
        .collect();

    let mut widths: Vec<usize> = Vec::new();
    for (cells, _) in &rows {
        // The last cell is not tab-terminated and does not size a column.
        for (i, cell) in cells[..cells.len() - 1].iter().enumerate() {
            let width = cell.width();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    for (cells, newline) in rows {
        let last = cells.len() - 1;
        for (i, cell) in cells.iter().enumerate() {
            out.push_str(cell);
            if i < last {
                let fill = widths[i] - cell.width() + padding;
                out.extend(std::iter::repeat_n(' ', fill));
            }
        }
        out.push_str(newline);
    }
    block.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pads_to_widest_cell() {
        let text = "ID\tTYPE\tROOT\nolt-1\topenolt\ttrue\nonu-10\tbrcm\tfalse\n";
        assert_eq!(
            align_columns(text, 4),
            "ID        TYPE       ROOT\n\
             olt-1     openolt    true\n\
             onu-10    brcm       false\n"
        );
    }

    #[test]
    fn test_lines_without_tabs_break_blocks() {
        let text = "a\tb\nplain line\nlonger-cell\tc\n";
        assert_eq!(
            align_columns(text, 1),
            "a b\nplain line\nlonger-cell c\n"
        );
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        let text = "名前\tx\nab\ty\n";
        assert_eq!(align_columns(text, 2), "名前  x\nab    y\n");
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(align_columns("a\tb", 2), "a  b");
        assert_eq!(align_columns("", 2), "");
    }
}
