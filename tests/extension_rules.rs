//! Extension rule behavior through the public session API: links, images,
//! math, citations, contact info, and code highlighting.

use rstest::rstest;

use marq::render::citation_anchor_html;
use marq::{
    CitationOptions, CitationRecord, HighlightOptions, LinkOptions, RuleSpec, Session,
};

fn default_render(src: &str) -> String {
    Session::with_defaults().render(src).html
}

fn link_session(link: LinkOptions) -> Session {
    let mut session = Session::new();
    session.enable_spec(RuleSpec::Link(link));
    session
}

// ---------------------------------------------------------------- links

#[test]
fn link_opens_in_new_tab_by_default() {
    let html = default_render("[text](https://example.com)");
    assert_eq!(
        html,
        "<p><a href=\"https://example.com\" target=\"_blank\">text</a></p>\n"
    );
}

#[test]
fn link_same_tab_when_configured() {
    let session = link_session(LinkOptions {
        open_links_in_new_tab: false,
        ..LinkOptions::default()
    });
    let html = session.render("[text](https://example.com)").html;
    assert_eq!(html, "<p><a href=\"https://example.com\">text</a></p>\n");
}

#[test]
fn link_title_rendered() {
    let html = default_render("[t](https://example.com \"hover\")");
    assert!(html.contains("title=\"hover\""), "{html}");
}

#[test]
fn link_label_gets_inline_pass() {
    let html = default_render("[*em* label](https://example.com)");
    assert!(html.contains("><em>em</em> label</a>"), "{html}");
}

#[test]
fn tracking_params_stripped() {
    let html = default_render("[x](https://example.com/page?utm_source=a&q=1&fbclid=z)");
    assert!(html.contains("href=\"https://example.com/page?q=1\""), "{html}");
}

#[test]
fn proxied_link_unwraps_to_label() {
    let html = default_render("[report](https://storage.googleapis.com/kagi/doc.pdf)");
    assert_eq!(html, "<p>report</p>\n");
}

#[test]
fn youtube_link_embeds_when_enabled() {
    let session = link_session(LinkOptions {
        embed_third_party_content: true,
        ..LinkOptions::default()
    });
    let html = session
        .render("[v](https://www.youtube.com/watch?v=dQw4w9WgXcQ)")
        .html;
    assert!(html.contains("<iframe"), "{html}");
    assert!(
        html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"),
        "{html}"
    );
}

#[test]
fn youtube_link_stays_anchor_by_default() {
    let html = default_render("[v](https://www.youtube.com/watch?v=dQw4w9WgXcQ)");
    assert!(html.contains("<a href="), "{html}");
    assert!(!html.contains("<iframe"), "{html}");
}

#[test]
fn malformed_link_stays_literal() {
    assert_eq!(
        default_render("[no destination]"),
        "<p>[no destination]</p>\n"
    );
    assert_eq!(
        default_render("[unclosed](https://example.com"),
        "<p>[unclosed](https://example.com</p>\n"
    );
}

// --------------------------------------------------------------- images

#[test]
fn image_renders_with_alt() {
    let html = default_render("![a cat](https://example.com/cat.png)");
    assert_eq!(
        html,
        "<p><img src=\"https://example.com/cat.png\" alt=\"a cat\"></p>\n"
    );
}

#[test]
fn proxied_image_degrades_to_alt_text() {
    let html = default_render("![a cat](https://storage.googleapis.com/kagi/cat.png)");
    assert_eq!(html, "<p>a cat</p>\n");
}

// ----------------------------------------------------------------- math

#[rstest]
#[case("$a^2$", true)]
#[case("$x$", true)]
#[case("$x+y$ sum", true)]
#[case("($x$)", true)]
#[case("$a_i$", true)]
#[case("$ x$", false)]
#[case("$x $", false)]
#[case("$x$y", false)]
#[case("a$x$", false)]
#[case("**$5** is less than **$6**", false)]
#[case("$5 and $6", false)]
#[case("price is $100 today", false)]
#[case("\\$5 \\$6", false)]
fn dollar_spans(#[case] src: &str, #[case] expect_math: bool) {
    let html = default_render(src);
    assert_eq!(html.contains("<math"), expect_math, "{src} -> {html}");
}

#[test]
fn inline_math_renders_superscript() {
    let html = default_render("$a^2$");
    assert!(html.contains("<math display=\"inline\">"), "{html}");
    assert!(html.contains("<msup>"), "{html}");
}

#[test]
fn display_math_renders_block() {
    let html = default_render("$$\nx + y\n$$");
    assert!(html.contains("<math display=\"block\">"), "{html}");
}

#[test]
fn double_dollar_is_display_not_two_inline() {
    let html = default_render("$$x$$");
    assert!(html.contains("display=\"block\""), "{html}");
    assert!(!html.contains("display=\"inline\""), "{html}");
}

// ------------------------------------------------------------ citations

fn citation_session(records: Vec<CitationRecord>) -> Session {
    let mut session = Session::new();
    session.enable_spec(RuleSpec::Citation(CitationOptions {
        citations: records,
        open_links_in_new_tab: true,
    }));
    session
}

fn record(index: usize, source: &str) -> CitationRecord {
    CitationRecord {
        index,
        title: format!("Source {index}"),
        source: source.to_string(),
        passage: String::new(),
        offset: 0,
    }
}

#[test]
fn citation_marker_becomes_sup_anchor() {
    let session = citation_session(vec![record(1, "https://example.com/a")]);
    let out = session.render("Fact【1】.");
    assert_eq!(out.html.matches("<sup>").count(), 1, "{}", out.html);
    assert!(!out.html.contains('【'), "{}", out.html);
    assert!(
        out.html.contains("href=\"https://example.com/a\""),
        "{}",
        out.html
    );
}

#[test]
fn citation_offsets_point_at_anchors() {
    let records = vec![
        record(1, "https://example.com/a"),
        record(2, "https://example.com/b"),
    ];
    let session = citation_session(records.clone());
    let out = session.render("One【1】 and two【2】 end.");
    assert_eq!(out.citations.len(), 2);
    for (emitted, original) in out.citations.iter().zip(&records) {
        let anchor = citation_anchor_html(original, true);
        let slice = &out.html[emitted.offset..emitted.offset + anchor.len()];
        assert_eq!(slice, anchor);
    }
}

#[test]
fn citation_markers_reenumerated_densely() {
    let session = citation_session(vec![
        record(1, "https://example.com/a"),
        record(2, "https://example.com/b"),
    ]);
    let out = session.render("a【4】b【9】");
    assert!(out.html.contains(">1</a>"), "{}", out.html);
    assert!(out.html.contains(">2</a>"), "{}", out.html);
}

#[test]
fn citation_without_record_stays_literal() {
    let session = citation_session(vec![record(1, "https://example.com/a")]);
    let out = session.render("a【1】b【2】");
    // the second marker has no record: it stays literal and emits no record
    assert_eq!(out.citations.len(), 1);
    assert!(out.html.contains("【2】"), "{}", out.html);
}

#[test]
fn citation_non_http_source_gets_bare_anchor() {
    let session = citation_session(vec![record(1, "internal-note")]);
    let out = session.render("x【1】");
    assert!(out.html.contains("<sup><a>1</a></sup>"), "{}", out.html);
}

// --------------------------------------------------------- contact info

fn contact_session() -> Session {
    let mut session = Session::new();
    session.enable_spec(RuleSpec::ContactInfo);
    session
}

#[test]
fn bare_phone_number_linked() {
    let html = contact_session().render("Contact me at 123-456-7890.").html;
    assert_eq!(
        html,
        "<p>Contact me at <a href=\"tel:1234567890\">123-456-7890</a>.</p>\n"
    );
}

#[test]
fn phone_with_country_code_and_parens() {
    let html = contact_session().render("dial +1 (555) 867-5309 now").html;
    assert!(html.contains("href=\"tel:+15558675309\""), "{html}");
    assert!(html.contains(">+1 (555) 867-5309</a>"), "{html}");
}

#[test]
fn bare_email_linked() {
    let html = contact_session().render("write joe@example.com today").html;
    assert!(
        html.contains("<a href=\"mailto:joe@example.com\">joe@example.com</a>"),
        "{html}"
    );
}

#[test]
fn digits_inside_identifier_untouched() {
    let html = contact_session().render("id=123-456-7890abc").html;
    assert_eq!(html, "<p>id=123-456-7890abc</p>\n");
}

// ----------------------------------------------------------- highlight

fn highlight_session() -> Session {
    let mut session = Session::new();
    session.enable_spec(RuleSpec::Highlight(HighlightOptions::default()));
    session
}

#[test]
fn known_language_gets_highlighted_wrapper() {
    let html = highlight_session()
        .render("```rust\nfn main() {}\n```")
        .html;
    assert!(html.contains("class=\"codehilite\""), "{html}");
    assert!(html.contains("<span class=\"k\">fn</span>"), "{html}");
}

#[test]
fn filename_in_info_string_gets_banner() {
    let html = highlight_session()
        .render("```rust main.rs\nfn main() {}\n```")
        .html;
    assert!(html.contains("codehilite-filename"), "{html}");
    assert!(html.contains("main.rs"), "{html}");
}

#[test]
fn unknown_language_falls_back_to_plain_block() {
    let html = highlight_session().render("```brainfuck\n+++\n```").html;
    assert_eq!(
        html,
        "<pre><code class=\"language-brainfuck\">+++\n</code></pre>\n"
    );
}

#[test]
fn highlighted_content_still_escaped() {
    let html = highlight_session()
        .render("```python\nx = \"<b>\"\n```")
        .html;
    assert!(!html.contains("<b>"), "{html}");
    assert!(html.contains("&lt;b&gt;"), "{html}");
}

#[test]
fn inline_styles_when_pygments_classes_off() {
    let mut session = Session::new();
    session.enable_spec(RuleSpec::Highlight(HighlightOptions {
        pygments_classes: false,
        cache: false,
    }));
    let html = session.render("```rust\nfn main() {}\n```").html;
    assert!(html.contains("<span style="), "{html}");
    assert!(!html.contains("class=\"k\""), "{html}");
}
