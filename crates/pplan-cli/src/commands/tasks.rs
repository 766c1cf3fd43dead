use std::path::Path;

use anyhow::Result;
use clap::Args;

use super::load_config;

#[derive(Args)]
pub struct TasksArgs {
    /// Print the task definitions as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TasksArgs, explicit: Option<&Path>) -> Result<()> {
    let config = load_config(explicit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.progress.tasks)?);
        return Ok(());
    }

    for (i, task) in config.progress.tasks.iter().enumerate() {
        println!("{}. {} (+{} P)", i + 1, task.name, task.reward);
    }
    println!(
        "Complete all {} to earn {} P. Level up every {} P.",
        config.progress.tasks.len(),
        config.progress.tasks.iter().map(|t| u64::from(t.reward)).sum::<u64>(),
        config.progress.level_up_threshold
    );
    Ok(())
}
