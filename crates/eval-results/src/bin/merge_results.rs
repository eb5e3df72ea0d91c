use anyhow::Result;
use eval_results::{bootstrap, report};
use results_core::settings::MergeSettings;
use results_data::merger::merge_shards;

fn main() -> Result<()> {
    let settings = MergeSettings::load();
    bootstrap::setup_logging(&settings.logging.log_level)?;

    tracing::debug!(
        "merge-results v{}: {} -> {}",
        env!("CARGO_PKG_VERSION"),
        settings.input_dir.display(),
        settings.output.display()
    );

    let outcome = merge_shards(&settings.input_dir, &settings.output)?;
    println!("{}", report::merge_line(&outcome));

    Ok(())
}
