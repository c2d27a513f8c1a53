//! Plain-text tables for zones and records

use cfdash_client::{AUTO_TTL, DnsRecord, Domain};

const CONTENT_WIDTH: usize = 40;

pub fn domains_table(domains: &[Domain]) -> String {
    let mut out = format!(
        "{:<32}  {:<32}  {:<8}  {:<8}\n",
        "ID", "NAME", "STATUS", "TYPE"
    );
    out.push_str(&"-".repeat(86));
    out.push('\n');
    for domain in domains {
        let status = if domain.paused {
            "paused"
        } else {
            domain.status.as_str()
        };
        out.push_str(&format!(
            "{:<32}  {:<32}  {:<8}  {:<8}\n",
            domain.id, domain.name, status, domain.zone_type
        ));
    }
    out
}

pub fn records_table(records: &[DnsRecord]) -> String {
    let mut out = format!(
        "{:<32}  {:<6}  {:<32}  {:<CONTENT_WIDTH$}  {:>6}\n",
        "ID", "TYPE", "NAME", "CONTENT", "TTL"
    );
    out.push_str(&"-".repeat(126));
    out.push('\n');
    for record in records {
        out.push_str(&record_line(record));
        out.push('\n');
    }
    out
}

pub fn record_line(record: &DnsRecord) -> String {
    format!(
        "{:<32}  {:<6}  {:<32}  {:<CONTENT_WIDTH$}  {:>6}",
        record.id,
        record.record_type.as_str(),
        record.name,
        truncate(&record.content, CONTENT_WIDTH),
        ttl_label(record.ttl)
    )
}

fn ttl_label(ttl: u32) -> String {
    if ttl == AUTO_TTL {
        "auto".to_string()
    } else {
        ttl.to_string()
    }
}

/// Cut `s` to at most `max` characters, marking the cut with `...`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
