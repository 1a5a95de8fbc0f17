//! Cross-cutting pipeline behavior: escaping discipline, verbatim regions,
//! and whole-document rendering with the default rule set.

use marq::{render, Session};

#[test]
fn html_escaped_exactly_once() {
    assert_eq!(render("a & b < c"), "<p>a &amp; b &lt; c</p>\n");
    // already-escaped input is data, not markup
    assert_eq!(render("a &amp; b"), "<p>a &amp;amp; b</p>\n");
}

#[test]
fn attribute_values_escaped() {
    let html = render("[x](https://example.com/?a=\"q\")");
    assert!(!html.contains("=\"q\""), "{html}");
}

#[test]
fn fenced_content_never_reinterpreted() {
    let html = render("```\n*em* [l](u) $x$ # heading\n```");
    assert_eq!(
        html,
        "<pre><code>*em* [l](u) $x$ # heading\n</code></pre>\n"
    );
}

#[test]
fn code_span_content_never_reinterpreted() {
    let html = render("`[l](u) $x$`");
    assert_eq!(html, "<p><code>[l](u) $x$</code></p>\n");
}

#[test]
fn rules_compose_in_one_paragraph() {
    let html = render("see [*docs*](https://example.com) and $a^2$");
    assert!(html.contains("<a href=\"https://example.com\""), "{html}");
    assert!(html.contains("<em>docs</em>"), "{html}");
    assert!(html.contains("<math"), "{html}");
}

#[test]
fn whole_document_snapshot() {
    let doc = "# Doc\n\npara with *em*\n\n- one\n- two\n\n> quote";
    insta::assert_snapshot!(render(doc), @r###"
    <h1>Doc</h1>
    <p>para with <em>em</em></p>
    <ul>
    <li>one</li>
    <li>two</li>
    </ul>
    <blockquote>
    <p>quote</p>
    </blockquote>
    "###);
}

#[test]
fn loose_list_items_keep_paragraphs() {
    let html = render("- one\n\n- two");
    assert!(html.contains("<li>\n<p>one</p>\n</li>"), "{html}");
}

#[test]
fn sessions_are_reusable_across_documents() {
    let session = Session::with_defaults();
    assert!(session.render("$x$").html.contains("<math"));
    // state from the previous render must not leak
    assert_eq!(session.render("plain").html, "<p>plain</p>\n");
}
