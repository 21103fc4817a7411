//! Page layout and verification block
//!
//! Fixed-width plain-text pagination with per-page headers and footers,
//! plus the digest/signature block appended to every document.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Datelike, Utc};
use sha2::{Digest, Sha256};

use crate::domain::entities::PackId;

pub const PAGE_WIDTH: usize = 78;
pub const BODY_LINES_PER_PAGE: usize = 40;

pub fn rule() -> String {
    "=".repeat(PAGE_WIDTH)
}

pub fn thin_rule() -> String {
    "-".repeat(PAGE_WIDTH)
}

/// A left-labelled field line
pub fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<32}{}", format!("{}:", label), value)
}

pub fn centered(text: &str) -> String {
    if text.len() >= PAGE_WIDTH {
        return text.to_string();
    }
    let pad = (PAGE_WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Compose the final document: body plus verification block, chunked into
/// pages with per-page headers and footers.
pub fn compose(
    title: &str,
    reference: &str,
    pack_id: &PackId,
    generated_at: DateTime<Utc>,
    mut body: Vec<String>,
) -> String {
    body.extend(verification_block(pack_id, reference, &body, generated_at));

    let page_count = body.len().div_ceil(BODY_LINES_PER_PAGE).max(1);
    let mut out = String::new();

    for (page_index, chunk) in body.chunks(BODY_LINES_PER_PAGE).enumerate() {
        out.push_str(&rule());
        out.push('\n');
        out.push_str(&centered(title));
        out.push('\n');
        out.push_str(&centered(&format!("Ref: {}", reference)));
        out.push('\n');
        out.push_str(&rule());
        out.push('\n');

        for line in chunk {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str(&thin_rule());
        out.push('\n');
        out.push_str(&centered(&format!(
            "Page {} of {}  |  Generated {}",
            page_index + 1,
            page_count,
            generated_at.format("%Y-%m-%d")
        )));
        out.push('\n');
    }

    out
}

/// Digest, machine-readable payload, and signature line.
///
/// The digest covers the pack id, the reference number, and the body as
/// rendered, so any tampering with the stored text invalidates it.
fn verification_block(
    pack_id: &PackId,
    reference: &str,
    body: &[String],
    generated_at: DateTime<Utc>,
) -> Vec<String> {
    let mut hasher = Sha256::new();
    hasher.update(pack_id.as_str());
    hasher.update(reference);
    hasher.update(body.join("\n"));
    let digest = hex::encode(hasher.finalize());

    let payload = serde_json::json!({
        "pack_id": pack_id.as_str(),
        "reference": reference,
        "digest": digest,
    });
    let encoded = STANDARD.encode(payload.to_string());

    vec![
        String::new(),
        thin_rule(),
        "DOCUMENT VERIFICATION".to_string(),
        field("SHA-256", &digest),
        field("Verification payload", encoded),
        field(
            "Signature",
            format!("LACRA-{}-{}", pack_id, generated_at.year()),
        ),
        thin_rule(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_documents_are_one_page() {
        let pack_id = PackId::from("EUDR-0001700000000000-1a2b");
        let body = vec!["line one".to_string(), "line two".to_string()];
        let text = compose("Test Document", "COVER-X", &pack_id, Utc::now(), body);

        assert!(text.contains("Page 1 of 1"));
        assert!(!text.contains("Page 2"));
    }

    #[test]
    fn long_documents_paginate() {
        let pack_id = PackId::from("EUDR-0001700000000000-1a2b");
        let body: Vec<String> = (0..90).map(|i| format!("line {}", i)).collect();
        let text = compose("Test Document", "COVER-X", &pack_id, Utc::now(), body);

        assert!(text.contains("Page 1 of 3"));
        assert!(text.contains("Page 3 of 3"));
        // Each page repeats the header
        assert_eq!(text.matches("Test Document").count(), 3);
    }

    #[test]
    fn digest_changes_with_body() {
        let pack_id = PackId::from("EUDR-0001700000000000-1a2b");
        let now = Utc::now();
        let a = compose("T", "R", &pack_id, now, vec!["alpha".to_string()]);
        let b = compose("T", "R", &pack_id, now, vec!["beta".to_string()]);

        let digest = |text: &str| {
            text.lines()
                .find(|l| l.contains("SHA-256:"))
                .unwrap()
                .to_string()
        };
        assert_ne!(digest(&a), digest(&b));
    }

    #[test]
    fn field_lines_align() {
        let line = field("Producer", "PROD-001");
        assert!(line.starts_with("Producer:"));
        assert_eq!(line.find("PROD-001").unwrap(), 32);
    }
}
