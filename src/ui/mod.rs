//! HTML rendering
//!
//! - `css.rs`: styles
//! - `script.rs`: browser relay for navigation and form events
//! - `landing.rs` / `dashboard.rs`: one renderer per view
//!
//! Views render to HTML fragments swapped into `#app` by the page shell.

mod css;
mod dashboard;
mod landing;
mod script;

pub use dashboard::render_dashboard;
pub use landing::render_landing;

use crate::app::{ActiveView, App};

/// Page shell served at `/`; the script fills `#app` from the fragment
pub fn page_shell() -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Hyperliquid PnL</title>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=JetBrains+Mono:wght@400;500&display=swap" rel="stylesheet">
    <style>
{css}
    </style>
</head>
<body>
    <header class="app-header">
        <div class="brand"><span>HL</span> // PnL</div>
        <a href="#/">Change account</a>
    </header>
    <main id="app"></main>
    <script>
{js}
    </script>
</body>
</html>"##,
        css = css::STYLES,
        js = script::SCRIPT
    )
}

/// Render whichever view is mounted
pub fn render_view(app: &App, origin: &str, now_secs: i64) -> String {
    match app.view() {
        ActiveView::Landing(view) => render_landing(view),
        ActiveView::Dashboard(view) => render_dashboard(view, origin, now_secs),
    }
}

/// Escape text for use in HTML content and double-quoted attributes
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_shell() {
        let html = page_shell();
        assert!(html.contains(r#"<main id="app"></main>"#));
        assert!(html.contains("hashchange"));
        assert!(html.contains("--bg-dark"));
    }

    #[test]
    fn test_render_view_follows_route() {
        let mut app = App::new(Preferences::in_memory(), "https://default.test", 15_000);
        assert!(render_view(&app, "http://o", 0).contains(r#"id="landing""#));

        app.navigate("#/acct/0xabc");
        assert!(render_view(&app, "http://o", 0).contains(r#"id="options""#));
    }
}
