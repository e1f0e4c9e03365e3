//! Relative links between generated pages.

/// Computes links from the pages of one directory to other pages.
///
/// Pure path arithmetic on `/`-separated paths; the file system is never
/// consulted.
///
/// # Example
///
/// ```
/// use refdoc_site::UrlLinker;
///
/// let linker = UrlLinker::new("/ref/NS/ClassA");
/// assert_eq!(linker.to("/ref/NS/ClassB/ClassB.md"), "../ClassB/ClassB.md");
/// assert_eq!(linker.to("/ref/NS/ClassA/methods/run.md"), "methods/run.md");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlLinker {
    source_dir: String,
}

impl UrlLinker {
    /// Create a linker for pages in `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl AsRef<str>) -> Self {
        Self {
            source_dir: normalize_dir(source_dir.as_ref()),
        }
    }

    /// Normalized source directory (leading `/`, no trailing `/`).
    #[must_use]
    pub fn source_dir(&self) -> &str {
        &self.source_dir
    }

    /// Path of `destination` relative to the source directory.
    ///
    /// Pages in the source directory link by file name alone.
    #[must_use]
    pub fn to(&self, destination: &str) -> String {
        let from: Vec<&str> = segments(&self.source_dir).collect();
        let to: Vec<&str> = segments(destination).collect();
        let to_dir = &to[..to.len().saturating_sub(1)];

        let common = from
            .iter()
            .zip(to_dir)
            .take_while(|(a, b)| a == b)
            .count();

        let ups = "../".repeat(from.len() - common);
        let down = to[common..].join("/");
        format!("{ups}{down}")
    }

    /// Markdown link `[text](relative)` to `destination`.
    #[must_use]
    pub fn link(&self, text: &str, destination: &str) -> String {
        format!("[{text}]({})", self.to(destination))
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Normalize a directory path to `/a/b` form (root is `/`).
#[must_use]
pub fn normalize_dir(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_directory() {
        let linker = UrlLinker::new("/ref/NS/ClassA");

        assert_eq!(linker.to("/ref/NS/ClassB/ClassB.md"), "../ClassB/ClassB.md");
    }

    #[test]
    fn test_root_source() {
        let linker = UrlLinker::new("/");

        assert_eq!(linker.to("/other.md"), "other.md");
    }

    #[test]
    fn test_same_directory_links_by_file_name() {
        let linker = UrlLinker::new("/ref/Acme");

        assert_eq!(linker.to("/ref/Acme/index.md"), "index.md");
    }

    #[test]
    fn test_deep_to_shallow() {
        let linker = UrlLinker::new("/ref/Acme/Invoice/methods");

        assert_eq!(linker.to("/ref/Acme/index.md"), "../../index.md");
        assert_eq!(linker.to("/ref/api.md"), "../../../api.md");
    }

    #[test]
    fn test_shallow_to_deep() {
        let linker = UrlLinker::new("/ref");

        assert_eq!(
            linker.to("/ref/Acme/Invoice/methods/total.md"),
            "Acme/Invoice/methods/total.md"
        );
    }

    #[test]
    fn test_disjoint_trees() {
        let linker = UrlLinker::new("/a/b");

        assert_eq!(linker.to("/c/d.md"), "../../c/d.md");
    }

    #[test]
    fn test_normalizes_slashes() {
        let linker = UrlLinker::new("ref/Acme/");

        assert_eq!(linker.source_dir(), "/ref/Acme");
        assert_eq!(linker.to("ref/Acme/Invoice/Invoice.md"), "Invoice/Invoice.md");
    }

    #[test]
    fn test_same_inputs_same_output() {
        let first = UrlLinker::new("/ref/NS/ClassA").to("/ref/NS/ClassB/ClassB.md");
        let second = UrlLinker::new("/ref/NS/ClassA").to("/ref/NS/ClassB/ClassB.md");

        assert_eq!(first, second);
    }

    #[test]
    fn test_markdown_link() {
        let linker = UrlLinker::new("/ref/Acme");

        assert_eq!(
            linker.link("Invoice", "/ref/Acme/Invoice/Invoice.md"),
            "[Invoice](Invoice/Invoice.md)"
        );
    }

    #[test]
    fn test_normalize_dir_root() {
        assert_eq!(normalize_dir(""), "/");
        assert_eq!(normalize_dir("//"), "/");
    }
}
