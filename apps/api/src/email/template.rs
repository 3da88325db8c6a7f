//! Branded HTML wrapper and Markdown rendering for summary emails.

use pulldown_cmark::{html, Options, Parser};

pub const TIMESTAMP_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";
pub const NO_SUMMARY_PLACEHOLDER: &str = "<p><em>No summary provided.</em></p>";

/// Renders CommonMark (plus tables and strikethrough) to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Body precedence: caller-supplied HTML verbatim, else rendered Markdown,
/// else the placeholder. Blank strings count as absent.
pub fn resolve_body(html: Option<&str>, summary: Option<&str>) -> String {
    fn present(s: Option<&str>) -> Option<&str> {
        s.filter(|s| !s.trim().is_empty())
    }
    match (present(html), present(summary)) {
        (Some(html), _) => html.to_string(),
        (None, Some(markdown)) => markdown_to_html(markdown),
        (None, None) => NO_SUMMARY_PLACEHOLDER.to_string(),
    }
}

pub fn render_email_html(body: &str, sent_at: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:24px;background:#f8fafc;">
    <div style="max-width:680px;margin:0 auto;padding:32px;background:#ffffff;border-radius:12px;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;color:#1f2937;line-height:1.6;">
      <h1 style="margin:0 0 4px;font-size:22px;color:#7c3aed;">AI Meeting Summary</h1>
      <p style="margin:0;font-size:13px;color:#6b7280;">Generated by AI Meeting Summarizer</p>
      <hr style="border:none;border-top:1px solid #e5e7eb;margin:20px 0;" />
      {body}
      <hr style="border:none;border-top:1px solid #e5e7eb;margin:20px 0;" />
      <p style="margin:0;font-size:12px;color:#9ca3af;">Sent on {sent_at}</p>
    </div>
  </body>
</html>
"##
    )
}
