//! Inline-level rendering through a core session: emphasis, code spans,
//! escapes, breaks, autolinks, and raw inline HTML.

use marq::Session;

fn render(src: &str) -> String {
    Session::new().render(src).html
}

#[test]
fn emphasis_and_strong() {
    assert_eq!(
        render("*em* and **strong**"),
        "<p><em>em</em> and <strong>strong</strong></p>\n"
    );
}

#[test]
fn emphasis_nested_in_strong() {
    assert_eq!(
        render("**bold *and em***"),
        "<p><strong>bold <em>and em</em></strong></p>\n"
    );
}

#[test]
fn triple_markers_nest_strong_and_em() {
    assert_eq!(render("***a***"), "<p><em><strong>a</strong></em></p>\n");
}

#[test]
fn underscore_not_intraword() {
    assert_eq!(
        render("snake_case_name"),
        "<p>snake_case_name</p>\n"
    );
}

#[test]
fn asterisk_works_intraword() {
    assert_eq!(render("in*ten*se"), "<p>in<em>ten</em>se</p>\n");
}

#[test]
fn unmatched_marker_stays_literal() {
    assert_eq!(render("a * b"), "<p>a * b</p>\n");
    assert_eq!(render("*open only"), "<p>*open only</p>\n");
}

#[test]
fn code_span_simple() {
    assert_eq!(render("`let x`"), "<p><code>let x</code></p>\n");
}

#[test]
fn code_span_escapes_html_content() {
    assert_eq!(render("`a < b`"), "<p><code>a &lt; b</code></p>\n");
}

#[test]
fn code_span_with_inner_backtick() {
    assert_eq!(render("``a`b``"), "<p><code>a`b</code></p>\n");
}

#[test]
fn code_span_protects_emphasis_markers() {
    assert_eq!(render("`*not em*`"), "<p><code>*not em*</code></p>\n");
}

#[test]
fn unterminated_code_span_stays_literal() {
    assert_eq!(render("a `b c"), "<p>a `b c</p>\n");
}

#[test]
fn backslash_escapes_punctuation() {
    assert_eq!(render("\\*not em\\*"), "<p>*not em*</p>\n");
    assert_eq!(render("\\[bracket\\]"), "<p>[bracket]</p>\n");
}

#[test]
fn backslash_before_letter_is_literal() {
    assert_eq!(render("a\\bc"), "<p>a\\bc</p>\n");
}

#[test]
fn backslash_newline_is_hard_break() {
    assert_eq!(render("one\\\ntwo"), "<p>one<br>\ntwo</p>\n");
}

#[test]
fn uri_autolink() {
    assert_eq!(
        render("<https://example.com>"),
        "<p><a href=\"https://example.com\" target=\"_blank\">https://example.com</a></p>\n"
    );
}

#[test]
fn email_autolink_gets_mailto() {
    let html = render("<joe@example.com>");
    assert_eq!(
        html,
        "<p><a href=\"mailto:joe@example.com\" target=\"_blank\">joe@example.com</a></p>\n"
    );
}

#[test]
fn raw_inline_html_passes_through() {
    assert_eq!(render("a <b>bold</b> c"), "<p>a <b>bold</b> c</p>\n");
}

#[test]
fn html_comment_passes_through() {
    assert_eq!(render("x <!-- hidden --> y"), "<p>x <!-- hidden --> y</p>\n");
}

#[test]
fn bare_angle_bracket_escaped() {
    assert_eq!(render("1 < 2"), "<p>1 &lt; 2</p>\n");
}

#[test]
fn brackets_without_link_rule_stay_literal() {
    assert_eq!(
        render("[label](https://example.com)"),
        "<p>[label](https://example.com)</p>\n"
    );
}

#[test]
fn heading_content_gets_inline_pass() {
    assert_eq!(render("# a *b*"), "<h1>a <em>b</em></h1>\n");
}

#[test]
fn table_cells_get_inline_pass() {
    let html = Session::new().render("| *a* |\n| --- |\n| `b` |").html;
    assert!(html.contains("<th><em>a</em></th>"), "{html}");
    assert!(html.contains("<td><code>b</code></td>"), "{html}");
}
