//! Character-level line wrapping of styled runs.
//!
//! Descriptions are mostly CJK, which has no inter-word spaces, so lines
//! may break between any two characters. Characters are accumulated
//! greedily; the line is flushed when the next character would overflow.

use super::rich::RichTextRun;

/// One wrapped line: styled sub-runs plus their summed advance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedLine {
    pub runs: Vec<RichTextRun>,
    pub width: f32,
}

impl WrappedLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Wraps `runs` to `max_width`.
///
/// `advance(ch, bold)` gives the width of one character. A line never
/// exceeds `max_width` unless it holds a single character that alone is
/// wider. Style boundaries of the input runs are kept within each line.
/// `'\n'` ends the current line and is not emitted.
pub fn wrap_runs<F>(runs: &[RichTextRun], max_width: f32, mut advance: F) -> Vec<WrappedLine>
where
    F: FnMut(char, bool) -> f32,
{
    let mut lines = Vec::new();
    let mut line = WrappedLine::default();

    for run in runs {
        // Index of this run's fragment within the current line.
        let mut fragment: Option<usize> = None;

        for ch in run.text.chars() {
            if ch == '\n' {
                lines.push(std::mem::take(&mut line));
                fragment = None;
                continue;
            }

            let w = advance(ch, run.bold);
            if line.width + w > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                fragment = None;
            }

            let idx = *fragment.get_or_insert_with(|| {
                line.runs.push(RichTextRun {
                    text: String::new(),
                    ..run.clone()
                });
                line.runs.len() - 1
            });
            line.runs[idx].text.push(ch);
            line.width += w;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
