//! Contact info rule
//!
//!     Consumes the `<mailto:…>` and `<tel:…>` guards that normalization
//!     wrapped around bare email addresses and phone numbers, producing
//!     contact nodes that render as `mailto:`/`tel:` anchors. Runs before
//!     the core autolink handler at `<`, which would otherwise swallow the
//!     mailto guard as a generic URI autolink.

use crate::ast::{ContactKind, NodeKind};
use crate::inline::InlineScan;
use crate::normalize::{MAIL_PREFIX, PHONE_PREFIX};
use crate::rules::InlineRule;

/// `<mailto:…>` or `<tel:…>` at the start of `rest`
pub(crate) fn match_contact(rest: &str) -> Option<(ContactKind, String, usize)> {
    let body = rest.strip_prefix('<')?;
    let (kind, target) = if let Some(t) = body.strip_prefix(MAIL_PREFIX) {
        (ContactKind::Email, t)
    } else if let Some(t) = body.strip_prefix(PHONE_PREFIX) {
        (ContactKind::Phone, t)
    } else {
        return None;
    };
    let close = target.find('>')?;
    let raw = &target[..close];
    // phone numbers keep interior spaces for display; emails never have any
    if raw.is_empty() || raw.contains('\n') {
        return None;
    }
    if kind == ContactKind::Email && raw.contains(char::is_whitespace) {
        return None;
    }
    let prefix_len = match kind {
        ContactKind::Email => MAIL_PREFIX.len(),
        ContactKind::Phone => PHONE_PREFIX.len(),
    };
    Some((kind, raw.to_string(), 1 + prefix_len + close + 1))
}

pub struct ContactInfoRule;

impl InlineRule for ContactInfoRule {
    fn name(&self) -> &'static str {
        "contact_info"
    }

    fn marker(&self) -> char {
        '<'
    }

    fn priority(&self) -> i32 {
        10
    }

    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize> {
        let (kind, raw, consumed) = match_contact(scan.rest())?;
        scan.emit(NodeKind::ContactInfo { kind, raw });
        Some(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_guard() {
        let (kind, raw, consumed) = match_contact("<mailto:a@b.com> rest").unwrap();
        assert_eq!(kind, ContactKind::Email);
        assert_eq!(raw, "a@b.com");
        assert_eq!(consumed, "<mailto:a@b.com>".len());
    }

    #[test]
    fn test_phone_guard() {
        let (kind, raw, _) = match_contact("<tel:(555) 000-1234>").unwrap();
        assert_eq!(kind, ContactKind::Phone);
        assert_eq!(raw, "(555) 000-1234");
    }

    #[test]
    fn test_plain_angle_ignored() {
        assert!(match_contact("<https://example.com>").is_none());
        assert!(match_contact("<b>").is_none());
    }

    #[test]
    fn test_unterminated_guard() {
        assert!(match_contact("<mailto:a@b.com").is_none());
    }
}
