use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use miette::IntoDiagnostic;

use dl_session::{JsonFileRepository, SaveRepository, estimate_action_history_size};

pub fn run(dir: &Path, show: Option<&str>) -> miette::Result<()> {
    let repo = JsonFileRepository::new(dir);

    if let Some(slot) = show {
        let Some(state) = repo.load(slot).into_diagnostic()? else {
            miette::bail!("no save in slot '{slot}' under {}", dir.display());
        };
        print!("{}", state.action_history.export_markdown());
        println!();
        println!(
            "  {}",
            format!(
                "{} actions, ~{} bytes",
                state.action_history.total_action_count(),
                estimate_action_history_size(&state.action_history)
            )
            .dimmed()
        );
        return Ok(());
    }

    let summaries = repo.list_save_summaries().into_diagnostic()?;
    if summaries.is_empty() {
        println!("  No saves found in {}.", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "World", "Tick", "Saved", "Actions", "Creatures"]);
    for s in &summaries {
        table.add_row(vec![
            s.slot_name.clone(),
            s.world_name.clone(),
            s.tick.to_string(),
            s.saved_at.format("%Y-%m-%d %H:%M").to_string(),
            s.action_count.to_string(),
            s.creature_count.to_string(),
        ]);
    }
    println!("  {}", "Saved Games".bold().underline());
    println!();
    println!("{table}");
    Ok(())
}
