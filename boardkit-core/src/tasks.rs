/// Helpers for importing markdown checkbox tasks into board tickets.
///
/// The note holding the tasks lives in the host's editor; everything here
/// operates on plain text and 0-based line numbers only.

use std::sync::OnceLock;

use regex::Regex;

/// A candidate task line supplied by the external todo note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTask {
    pub line_number: usize,
    pub text: String,
}

fn task_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*- \[.\]").expect("valid task line regex"))
}

fn task_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*- \[.\]\s*").expect("valid task prefix regex"))
}

/// Whether a line is a markdown checkbox task (`- [ ]`, `- [x]`, any state).
pub fn is_task_line(line: &str) -> bool {
    task_line_re().is_match(line)
}

/// Strip the checkbox prefix and trim, leaving the task text.
pub fn extract_task_text(line: &str) -> String {
    task_prefix_re().replace(line, "").trim().to_string()
}

/// Collect the checkbox task lines within an inclusive line range.
/// The range may be given in either order (anchor/head of a selection).
pub fn collect_tasks(content: &str, from_line: usize, to_line: usize) -> Vec<TodoTask> {
    let (from, to) = if from_line <= to_line {
        (from_line, to_line)
    } else {
        (to_line, from_line)
    };
    content
        .lines()
        .enumerate()
        .skip(from)
        .take(to - from + 1)
        .filter(|(_, line)| is_task_line(line))
        .map(|(line_number, line)| TodoTask {
            line_number,
            text: line.to_string(),
        })
        .collect()
}

/// Remove the given lines from the text, e.g. after a successful import.
/// Deletions run in descending line order so earlier removals never shift
/// the remaining indices. Line endings are normalized to `\n`; a trailing
/// newline is preserved.
pub fn remove_lines(content: &str, line_numbers: &[usize]) -> String {
    let content = content.replace("\r\n", "\n");
    let had_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<&str> = content.split('\n').collect();
    if had_trailing_newline {
        // split leaves a trailing empty segment
        lines.pop();
    }
    let mut sorted = line_numbers.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    for line_number in sorted {
        if line_number < lines.len() {
            lines.remove(line_number);
        }
    }
    let mut out = lines.join("\n");
    if had_trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODO_NOTE: &str = "\
# Todo

- [ ] Buy groceries
some note in between
- [x] Walk the dog
- [ ]
- not a task
  - [ ] Indented task";

    #[test]
    fn test_is_task_line() {
        assert!(is_task_line("- [ ] open"));
        assert!(is_task_line("- [x] done"));
        assert!(is_task_line("  - [/] in progress"));
        assert!(!is_task_line("- plain bullet"));
        assert!(!is_task_line("Buy groceries"));
    }

    #[test]
    fn test_extract_task_text() {
        assert_eq!(extract_task_text("- [ ] Buy groceries"), "Buy groceries");
        assert_eq!(extract_task_text("  - [x]  Walk the dog  "), "Walk the dog");
        assert_eq!(extract_task_text("- [ ]   "), "");
    }

    #[test]
    fn test_collect_tasks_in_range() {
        let tasks = collect_tasks(TODO_NOTE, 0, 7);
        let lines: Vec<usize> = tasks.iter().map(|t| t.line_number).collect();
        assert_eq!(lines, vec![2, 4, 5, 7]);
        assert_eq!(tasks[0].text, "- [ ] Buy groceries");
    }

    #[test]
    fn test_collect_tasks_reversed_selection() {
        let forward = collect_tasks(TODO_NOTE, 2, 4);
        let backward = collect_tasks(TODO_NOTE, 4, 2);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_remove_lines_unsorted_input() {
        let out = remove_lines("a\nb\nc\nd", &[0, 2]);
        assert_eq!(out, "b\nd");

        // Ascending or descending input makes no difference
        let out = remove_lines("a\nb\nc\nd", &[2, 0]);
        assert_eq!(out, "b\nd");
    }

    #[test]
    fn test_remove_lines_ignores_out_of_range() {
        assert_eq!(remove_lines("a\nb", &[5, 1]), "a");
    }

    #[test]
    fn test_remove_lines_keeps_trailing_newline() {
        assert_eq!(remove_lines("a\nb\nc\n", &[1]), "a\nc\n");
        assert_eq!(remove_lines("a\nb", &[1]), "a");
        // Removing everything leaves an empty string, not a lone newline
        assert_eq!(remove_lines("a\n", &[0]), "");
    }

    #[test]
    fn test_remove_lines_normalizes_crlf() {
        assert_eq!(remove_lines("a\r\nb\r\nc", &[0]), "b\nc");
    }
}
