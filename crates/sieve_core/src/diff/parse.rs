//! Unified-diff parsing.
//!
//! Accepts the output of `git diff` (and plain `diff -u`) as served by a
//! hosting provider's compare endpoint. Hunk bodies are consumed by the line
//! counts in their `@@` header, so body lines that happen to look like file
//! headers (a removed `-- comment` line, say) are never misread.

use std::sync::LazyLock;

use regex::Regex;

#[cfg(feature = "tracing")]
use tracing::trace;

use super::error::DiffError;

/// Path used by diffs for the missing side of a created or deleted file.
pub const DEV_NULL: &str = "/dev/null";

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "static regex is known-valid at compile time")]
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
});

/// How a single line inside a hunk relates the old file to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present only in the new file (`+`).
    Added,
    /// Present only in the old file (`-`).
    Removed,
    /// Present in both files (` `).
    Context,
}

/// One line of a hunk body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    /// Whether the line was added, removed, or carried over.
    pub kind: ChangeKind,
    /// 1-indexed line number. New-file numbering for added and context
    /// lines, old-file numbering for removed lines.
    pub line: u32,
}

/// A contiguous block of changes within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// First line of the hunk in the old file.
    pub old_start: u32,
    /// Number of old-file lines covered by the hunk.
    pub old_len: u32,
    /// First line of the hunk in the new file.
    pub new_start: u32,
    /// Number of new-file lines covered by the hunk.
    pub new_len: u32,
    /// Body lines in diff order.
    pub changes: Vec<LineChange>,
}

/// The changes made to a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiff {
    /// Path before the change, without the `a/` prefix. `None` for created files.
    pub old_path: Option<String>,
    /// Path after the change, without the `b/` prefix. `None` for deleted files.
    pub new_path: Option<String>,
    /// Set when git reported the file as binary; binary files carry no hunks.
    pub binary: bool,
    /// Hunks in diff order.
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// Returns `true` if the file no longer exists after the change.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.new_path.is_none() && self.old_path.is_some()
    }

    /// Iterates over the new-file line numbers of every added line.
    pub fn added_lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.hunks
            .iter()
            .flat_map(|h| h.changes.iter())
            .filter(|c| c.kind == ChangeKind::Added)
            .map(|c| c.line)
    }
}

/// Parses unified-diff text into per-file changes.
///
/// Empty input yields an empty list. Extended git headers that carry no line
/// changes (mode changes, pure renames, binary markers) produce a `FileDiff`
/// with no hunks.
pub fn parse_unified_diff(text: &str) -> Result<Vec<FileDiff>, DiffError> {
    let mut parser = Parser::default();

    for (idx, line) in text.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }

    parser.finish(text.lines().count())
}

#[derive(Debug)]
struct OpenHunk {
    hunk: Hunk,
    /// Diff line and text of the `@@` header, for error reporting.
    header_line: usize,
    header: String,
    old_line: u32,
    new_line: u32,
    old_remaining: u32,
    new_remaining: u32,
}

impl OpenHunk {
    const fn is_complete(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }

    fn push(&mut self, kind: ChangeKind) -> Result<(), DiffError> {
        let line = match kind {
            ChangeKind::Added => {
                let line = self.new_line;
                self.new_line = self.advance(self.new_line)?;
                self.new_remaining = self.new_remaining.saturating_sub(1);
                line
            }
            ChangeKind::Removed => {
                let line = self.old_line;
                self.old_line = self.advance(self.old_line)?;
                self.old_remaining = self.old_remaining.saturating_sub(1);
                line
            }
            ChangeKind::Context => {
                let line = self.new_line;
                self.old_line = self.advance(self.old_line)?;
                self.new_line = self.advance(self.new_line)?;
                self.old_remaining = self.old_remaining.saturating_sub(1);
                self.new_remaining = self.new_remaining.saturating_sub(1);
                line
            }
        };

        self.hunk.changes.push(LineChange { kind, line });
        Ok(())
    }

    /// Line numbers past `u32::MAX` cannot come from a real file.
    fn advance(&self, line: u32) -> Result<u32, DiffError> {
        line.checked_add(1).ok_or_else(|| DiffError::MalformedHunkHeader {
            line: self.header_line,
            text: self.header.clone(),
        })
    }
}

#[derive(Debug, Default)]
struct Parser {
    files: Vec<FileDiff>,
    current: Option<FileDiff>,
    /// Whether the current file has already seen its `---` header.
    saw_old_header: bool,
    hunk: Option<OpenHunk>,
}

impl Parser {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), DiffError> {
        if let Some(open) = self.hunk.as_mut() {
            if open.is_complete() {
                self.close_hunk();
            } else {
                match line.as_bytes().first() {
                    Some(b'+') => open.push(ChangeKind::Added)?,
                    Some(b'-') => open.push(ChangeKind::Removed)?,
                    // Some tools strip the single space from blank context lines.
                    Some(b' ') | None => open.push(ChangeKind::Context)?,
                    Some(b'\\') => {}
                    Some(_) => return Err(DiffError::TruncatedHunk { line: line_no }),
                }
                return Ok(());
            }
        }

        if line.starts_with('\\') {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            self.start_file();
            let (old, new) = split_git_header(rest);
            let file = self.current_mut();
            file.old_path = old;
            file.new_path = new;
        } else if let Some(rest) = line.strip_prefix("--- ") {
            let needs_new_file = self
                .current
                .as_ref()
                .is_none_or(|f| !f.hunks.is_empty() || self.saw_old_header);
            if needs_new_file {
                self.start_file();
            }
            self.saw_old_header = true;
            self.current_mut().old_path = parse_header_path(rest, "a/");
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            self.current_mut().new_path = parse_header_path(rest, "b/");
        } else if line.starts_with("@@") {
            self.open_hunk(line_no, line)?;
        } else if let Some(rest) = line.strip_prefix("rename from ") {
            self.current_mut().old_path = Some(unquote(rest));
        } else if let Some(rest) = line.strip_prefix("rename to ") {
            self.current_mut().new_path = Some(unquote(rest));
        } else if line.starts_with("new file mode") {
            self.current_mut().old_path = None;
        } else if line.starts_with("deleted file mode") {
            self.current_mut().new_path = None;
        } else if line.starts_with("Binary files ") || line == "GIT binary patch" {
            self.current_mut().binary = true;
        }

        Ok(())
    }

    fn finish(mut self, last_line: usize) -> Result<Vec<FileDiff>, DiffError> {
        if self.hunk.as_ref().is_some_and(|h| !h.is_complete()) {
            return Err(DiffError::TruncatedHunk { line: last_line });
        }

        self.start_file();
        Ok(self.files)
    }

    fn open_hunk(&mut self, line_no: usize, line: &str) -> Result<(), DiffError> {
        if self.current.is_none() {
            return Err(DiffError::HunkWithoutFile { line: line_no });
        }

        let malformed = || DiffError::MalformedHunkHeader {
            line: line_no,
            text: line.to_string(),
        };

        let caps = HUNK_HEADER.captures(line).ok_or_else(malformed)?;
        let number = |idx: usize, default: u32| -> Result<u32, DiffError> {
            caps.get(idx)
                .map_or(Ok(default), |m| m.as_str().parse().map_err(|_err| malformed()))
        };

        let old_start = number(1, 0)?;
        let old_len = number(2, 1)?;
        let new_start = number(3, 0)?;
        let new_len = number(4, 1)?;

        if old_start.checked_add(old_len).is_none() || new_start.checked_add(new_len).is_none() {
            return Err(malformed());
        }

        #[cfg(feature = "tracing")]
        trace!(old_start, old_len, new_start, new_len, "hunk");

        self.hunk = Some(OpenHunk {
            hunk: Hunk {
                old_start,
                old_len,
                new_start,
                new_len,
                changes: Vec::new(),
            },
            header_line: line_no,
            header: line.to_string(),
            old_line: old_start,
            new_line: new_start,
            old_remaining: old_len,
            new_remaining: new_len,
        });

        Ok(())
    }

    fn close_hunk(&mut self) {
        if let Some(open) = self.hunk.take()
            && let Some(file) = self.current.as_mut()
        {
            file.hunks.push(open.hunk);
        }
    }

    fn start_file(&mut self) {
        self.close_hunk();
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
        self.saw_old_header = false;
    }

    fn current_mut(&mut self) -> &mut FileDiff {
        self.current.get_or_insert_with(FileDiff::default)
    }
}

/// Parses the path portion of a `---`/`+++` header.
fn parse_header_path(raw: &str, prefix: &str) -> Option<String> {
    // Non-git diffs append a tab and a timestamp.
    let raw = raw.split('\t').next().unwrap_or(raw);
    let path = unquote(raw.trim_end());

    if path == DEV_NULL {
        return None;
    }

    Some(path.strip_prefix(prefix).map_or_else(|| path.clone(), str::to_string))
}

/// Splits `a/<old> b/<new>` from a `diff --git` line.
fn split_git_header(rest: &str) -> (Option<String>, Option<String>) {
    let strip = |p: &str, prefix: &str| {
        let p = unquote(p);
        p.strip_prefix(prefix).map_or_else(|| p.clone(), str::to_string)
    };

    // Quoted form: "a/x y" "b/x y"
    if rest.starts_with('"')
        && let Some(split) = rest[1..].find("\" ").map(|i| i + 2)
    {
        let (old, new) = rest.split_at(split);
        return (Some(strip(old, "a/")), Some(strip(new.trim_start(), "b/")));
    }

    // Unchanged names make the header symmetric, which disambiguates paths
    // that themselves contain " b/".
    let half = rest.len() / 2;
    if rest.len() % 2 == 1 && rest.as_bytes().get(half) == Some(&b' ') {
        let (old, new) = (&rest[..half], &rest[half + 1..]);
        if let (Some(o), Some(n)) = (old.strip_prefix("a/"), new.strip_prefix("b/"))
            && o == n
        {
            return (Some(o.to_string()), Some(n.to_string()));
        }
    }

    match rest.rfind(" b/") {
        Some(idx) => (Some(strip(&rest[..idx], "a/")), Some(strip(&rest[idx + 1..], "b/"))),
        None => (None, None),
    }
}

/// Removes the C-style quoting git applies to paths with unusual characters.
///
/// With `core.quotePath` (the default) every byte outside printable ASCII is
/// written as a three-digit octal escape, so escapes are decoded to bytes
/// first and the path is rebuilt as UTF-8 afterwards.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut rest = inner.as_bytes();

    while let Some((&byte, tail)) = rest.split_first() {
        rest = tail;
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }

        let Some((&escape, tail)) = rest.split_first() else {
            bytes.push(b'\\');
            break;
        };
        rest = tail;

        let decoded = match escape {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b'0'..=b'7' => {
                let mut value = escape - b'0';
                for _ in 0..2 {
                    match rest.split_first() {
                        Some((&digit @ b'0'..=b'7', tail)) => {
                            value = value.wrapping_mul(8).wrapping_add(digit - b'0');
                            rest = tail;
                        }
                        _ => break,
                    }
                }
                value
            }
            other => other,
        };
        bytes.push(decoded);
    }

    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
