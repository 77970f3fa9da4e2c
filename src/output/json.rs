use crate::model::AuditResult;
use anyhow::Result;

pub fn print_json(result: &AuditResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{}", json);
    Ok(())
}
