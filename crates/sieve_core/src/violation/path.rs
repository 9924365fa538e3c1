use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use url::Url;

/// Maps SARIF artifact URIs onto the repository-relative paths used by diffs.
///
/// Tools disagree on how they spell locations: some emit `file:///abs/path`,
/// some absolute paths, some paths relative to the working directory, some
/// with `./` or Windows separators. All of them are folded to a
/// `/`-separated path relative to the repository root.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    root: PathBuf,
}

impl PathNormalizer {
    /// Creates a normaliser for a repository rooted at `root`.
    ///
    /// `root` should be absolute; otherwise absolute URIs are left untouched.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self { root: lexical(root) }
    }

    /// Normalises a single artifact URI.
    #[must_use]
    pub fn normalize(&self, uri: &str) -> String {
        let path = match Url::parse(uri) {
            Ok(url) if url.scheme() == "file" => file_url_to_path(&url),
            // Relative references, and bare Windows paths that parse with a
            // drive letter as the scheme.
            _ => PathBuf::from(percent_decode(uri).replace('\\', "/")),
        };

        let path = lexical(&path);
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.root).unwrap_or(path.as_path())
        } else {
            path.as_path()
        };

        to_slash(relative)
    }
}

/// Converts a `file:` URL to a path. A UNC host has no native form off
/// Windows, so it is kept as a leading `//host`.
fn file_url_to_path(url: &Url) -> PathBuf {
    url.to_file_path().unwrap_or_else(|()| {
        let path = percent_decode(url.path());
        match url.host_str() {
            Some(host) => PathBuf::from(format!("//{host}{path}")),
            None => PathBuf::from(path.into_owned()),
        }
    })
}

fn percent_decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolves `.` and `..` components and collapses repeated separators.
///
/// `..` components that would climb above the start of a relative path are
/// kept, since they refer to something outside the repository.
fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    out
}
