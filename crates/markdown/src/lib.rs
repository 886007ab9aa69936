//! Markdown link rewriting for plugin preview documents
//!
//! Preview documents are written for the plugin's own repository, so their
//! relative images and links break once the text is rendered on the site.
//! [`MarkdownRewriter`] turns them into absolute URLs on the source host.

pub mod rewriter;

pub use rewriter::{rewrite, MarkdownRewriter};
