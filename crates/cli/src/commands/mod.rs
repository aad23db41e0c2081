pub(crate) mod serve;
pub(crate) mod tables;
pub(crate) mod views;

use anyhow::Result;
use serde_json::Value;

pub(crate) fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
