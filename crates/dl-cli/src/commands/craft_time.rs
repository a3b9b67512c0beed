use dl_mechanics::calculate_craft_time;

pub fn run(difficulty: i32) -> miette::Result<()> {
    let seconds = calculate_craft_time(difficulty);
    let effective = difficulty.clamp(1, 5);
    if effective == difficulty {
        println!("  Difficulty {difficulty}: {seconds}s");
    } else {
        println!("  Difficulty {difficulty} (treated as {effective}): {seconds}s");
    }
    Ok(())
}
