use crate::model::AuditResult;
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Compromised Range")]
    range: String,
    #[tabled(rename = "Installed Versions")]
    versions: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

pub fn print_cli_table(result: &AuditResult) -> Result<()> {
    println!();
    println!(
        "Audit completed at: {}",
        result.audit_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Lockfile: {}", result.lockfile);
    println!();

    if result.findings.is_empty() {
        println!("No compromised packages found.");
    } else {
        println!("Found {} compromised packages:", result.findings.len());
        println!();

        let rows: Vec<FindingRow> = result
            .findings
            .iter()
            .map(|f| FindingRow {
                package: truncate(&f.package, 40),
                range: format_range(&f.matched_range),
                versions: truncate(&f.versions.join(", "), 40),
                notes: truncate(f.notes.as_deref().unwrap_or("-"), 50),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    println!();
    print_summary(result);

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

fn format_range(range: &str) -> String {
    if range.is_empty() {
        "* (all versions)".to_string()
    } else {
        range.to_string()
    }
}

fn print_summary(result: &AuditResult) {
    let matched_versions: usize = result.findings.iter().map(|f| f.versions.len()).sum();

    println!("Summary:");
    println!("  Packages indexed: {}", result.packages_indexed);
    println!("  Advisory records checked: {}", result.records_checked);

    if result.findings.is_empty() {
        println!("  Findings: none");
    } else {
        println!(
            "  Findings: {} packages, {} installed versions in range",
            result.findings.len(),
            matched_versions
        );
    }
}
