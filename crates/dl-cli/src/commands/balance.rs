use std::path::Path;

use miette::IntoDiagnostic;

use dl_core::BalanceConfig;

pub fn run(config: Option<&Path>) -> miette::Result<()> {
    let balance = match config {
        Some(path) => BalanceConfig::from_path(path).into_diagnostic()?,
        None => BalanceConfig::default(),
    };
    println!("{}", balance.to_json_pretty().into_diagnostic()?);
    Ok(())
}
