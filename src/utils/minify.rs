//! HTML minification of composed pages.
//!
//! Pages are written as composed unless `[build] minify = true` (or
//! `--minify`), in which case `minify_html` strips whitespace and comments
//! and compacts inline CSS/JS.

use std::borrow::Cow;

/// Minify `html` when `enabled`, otherwise hand it back untouched.
pub fn minify(html: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    // layouts commonly open <html>/<head> explicitly; keep them recognizable
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &[u8] = b"<html>\n  <head>\n    <title>About Us</title>\n  </head>\n  <body>\n    <!-- hero -->\n    <p>Hello</p>\n  </body>\n</html>\n";

    #[test]
    fn test_minify_disabled_borrows() {
        let out = minify(PAGE, false);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, PAGE);
    }

    #[test]
    fn test_minify_shrinks_page() {
        let out = minify(PAGE, true);
        let text = String::from_utf8_lossy(&out);

        assert!(out.len() < PAGE.len());
        assert!(!text.contains("\n  "));
        assert!(!text.contains("hero"));
        assert!(text.contains("<title>About Us</title>"));
        assert!(text.contains("<p>Hello</p>"));
    }
}
