//! Rewrites relative image and link targets into absolute URLs

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;
use treeline_registry::SourceHost;

/// `![alt](target)`
static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^)]+)\)").unwrap());

/// `[text](target)`, with the optional `!` captured so images can be skipped
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\[\]]+)\]\(([^)]+)\)").unwrap());

/// Rewrites preview markdown so it renders outside its repository.
///
/// Images point at the raw-content host, links at the browsable host, both on
/// the configured branch. Absolute `http(s)://` targets and `#anchor` links
/// are left alone.
///
/// Code spans and fenced blocks are not recognized: link syntax inside them
/// is rewritten like any other.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRewriter {
    host: SourceHost,
}

impl MarkdownRewriter {
    pub fn new(host: SourceHost) -> Self {
        Self { host }
    }

    /// Rewrite `markdown` for the repository at `repo_url`.
    ///
    /// Returns the text unchanged when `repo_url` is not a repository on the
    /// configured host.
    pub fn rewrite(&self, markdown: &str, repo_url: &str) -> String {
        let Some(repo) = self.host.repo_ref(repo_url) else {
            debug!("Not rewriting markdown, unrecognized repository: {:?}", repo_url);
            return markdown.to_string();
        };

        debug!("Rewriting markdown for {}", repo);
        let raw_base = self.host.raw_base(&repo);
        let browse_base = self.host.browse_base(&repo);

        let with_images = rewrite_images(markdown, &raw_base);
        rewrite_links(&with_images, &browse_base).into_owned()
    }
}

/// Rewrite `markdown` for a repository on the default host
pub fn rewrite(markdown: &str, repo_url: &str) -> String {
    MarkdownRewriter::default().rewrite(markdown, repo_url)
}

fn rewrite_images<'a>(markdown: &'a str, raw_base: &str) -> Cow<'a, str> {
    IMAGE_PATTERN.replace_all(markdown, |caps: &Captures| {
        let alt = &caps[1];
        let target = &caps[2];

        if is_absolute(target) {
            caps[0].to_string()
        } else {
            format!("![{}]({}/{})", alt, raw_base, strip_relative_prefix(target))
        }
    })
}

fn rewrite_links<'a>(markdown: &'a str, browse_base: &str) -> Cow<'a, str> {
    LINK_PATTERN.replace_all(markdown, |caps: &Captures| {
        let is_image = !caps[1].is_empty();
        let text = &caps[2];
        let target = &caps[3];

        if is_image || is_absolute(target) || target.starts_with('#') {
            caps[0].to_string()
        } else {
            format!("[{}]({}/{})", text, browse_base, strip_relative_prefix(target))
        }
    })
}

fn is_absolute(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Drop one leading `./`, or failing that one leading `/`
fn strip_relative_prefix(target: &str) -> &str {
    target
        .strip_prefix("./")
        .or_else(|| target.strip_prefix('/'))
        .unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const REPO: &str = "https://github.com/acme/widget";
    const RAW: &str = "https://raw.githubusercontent.com/acme/widget/main";
    const BLOB: &str = "https://github.com/acme/widget/blob/main";

    #[rstest]
    #[case("![shot](./img/a.png)", "![shot](RAW/img/a.png)")]
    #[case("![shot](/img/a.png)", "![shot](RAW/img/a.png)")]
    #[case("![shot](img/a.png)", "![shot](RAW/img/a.png)")]
    #[case("![](img/a.png)", "![](RAW/img/a.png)")]
    #[case("![up](../shared/a.png)", "![up](RAW/../shared/a.png)")]
    #[case("![twice](.//a.png)", "![twice](RAW//a.png)")]
    #[case("![a](https://x/y.png)", "![a](https://x/y.png)")]
    #[case("![a](http://x/y.png)", "![a](http://x/y.png)")]
    fn test_image_targets(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite(input, REPO), expected.replace("RAW", RAW));
    }

    #[rstest]
    #[case("[docs](docs/readme.md)", "[docs](BLOB/docs/readme.md)")]
    #[case("[docs](./docs/readme.md)", "[docs](BLOB/docs/readme.md)")]
    #[case("[docs](/docs/readme.md)", "[docs](BLOB/docs/readme.md)")]
    #[case("[x](#section)", "[x](#section)")]
    #[case("[site](https://treeline.money)", "[site](https://treeline.money)")]
    #[case("[empty]()", "[empty]()")]
    #[case("[](docs/readme.md)", "[](docs/readme.md)")]
    fn test_link_targets(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite(input, REPO), expected.replace("BLOB", BLOB));
    }

    #[test]
    fn test_images_use_raw_base_and_links_use_browse_base() {
        let input = "![logo](assets/logo.png) see [the guide](GUIDE.md)";
        let expected = format!(
            "![logo]({}/assets/logo.png) see [the guide]({}/GUIDE.md)",
            RAW, BLOB
        );
        assert_eq!(rewrite(input, REPO), expected);
    }

    #[test]
    fn test_image_anchor_targets_are_rewritten() {
        // Only links treat `#` as an in-page anchor
        assert_eq!(
            rewrite("![a](#b)", REPO),
            format!("![a]({}/#b)", RAW)
        );
    }

    #[test]
    fn test_badge_link_around_image() {
        let input = "[![build](badge.svg)](actions.md)";
        let expected = format!("[![build]({}/badge.svg)](actions.md)", RAW);

        assert_eq!(rewrite(input, REPO), expected);

        // Passes are independent of each other's order
        let links_first = rewrite_images(&rewrite_links(input, BLOB), RAW).into_owned();
        assert_eq!(links_first, expected);
    }

    #[test]
    fn test_link_pass_skips_images() {
        assert_eq!(rewrite_links("![a](b.png)", BLOB), "![a](b.png)");
        assert_eq!(rewrite_images("[a](b.md)", RAW), "[a](b.md)");
    }

    #[test]
    fn test_adjacent_links() {
        let input = "[a](a.md)[b](b.md) ![c](c.png)![d](d.png)";
        let expected = format!(
            "[a]({blob}/a.md)[b]({blob}/b.md) ![c]({raw}/c.png)![d]({raw}/d.png)",
            blob = BLOB,
            raw = RAW
        );
        assert_eq!(rewrite(input, REPO), expected);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let input = "# Goals\n\n![shot](./img/a.png)\n\nRead [docs](docs/readme.md) or jump to [usage](#usage).\n";
        let once = rewrite(input, REPO);
        let twice = rewrite(&once, REPO);

        assert_ne!(once, input);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_invalid_repository_leaves_text_unchanged() {
        let input = "![shot](./img/a.png) [docs](docs/readme.md)";

        assert_eq!(rewrite(input, ""), input);
        assert_eq!(rewrite(input, "https://gitlab.com/acme/widget"), input);
        assert_eq!(rewrite(input, "https://github.com/acme"), input);
    }

    #[test]
    fn test_text_without_references_is_unchanged() {
        let input = "Plain text with (parentheses) and [brackets] but no links.";
        assert_eq!(rewrite(input, REPO), input);
    }

    #[test]
    fn test_code_spans_are_not_special() {
        assert_eq!(
            rewrite("`[x](y.md)`", REPO),
            format!("`[x]({}/y.md)`", BLOB)
        );
    }

    #[test]
    fn test_custom_host() {
        let rewriter = MarkdownRewriter::new(SourceHost {
            scheme: "https".to_string(),
            browse_host: "git.example.org".to_string(),
            raw_host: "raw.example.org".to_string(),
            branch: "trunk".to_string(),
            preview_file: "PREVIEW.md".to_string(),
        });

        assert_eq!(
            rewriter.rewrite("![a](a.png) [b](b.md)", "https://git.example.org/team/tool"),
            "![a](https://raw.example.org/team/tool/trunk/a.png) \
             [b](https://git.example.org/team/tool/blob/trunk/b.md)"
        );
    }
}
