use anyhow::Result;
use eval_results::{bootstrap, report};
use results_core::settings::FigureSettings;
use results_data::aggregator::SolveRateAggregator;
use results_data::panels::unstyled_methods;
use results_data::reader::load_result_rows;
use results_plot::{render_figure, Figure};

fn main() -> Result<()> {
    let settings = FigureSettings::load();
    bootstrap::setup_logging(&settings.logging.log_level)?;

    tracing::debug!(
        "plot-figure v{}: {} at {} dpi, confidence {}",
        env!("CARGO_PKG_VERSION"),
        settings.input_file.display(),
        settings.dpi,
        settings.confidence
    );

    let rows = load_result_rows(&settings.input_file)?;
    let methods = SolveRateAggregator::distinct_methods(&rows);
    println!("{}", report::loaded_line(rows.len(), &methods));

    for method in unstyled_methods(&rows) {
        tracing::warn!("Method '{}' has no plot style and will be skipped", method);
    }

    let figure = Figure::from_rows(&rows, settings.confidence);
    if figure.is_empty() {
        tracing::warn!("No rows matched either panel; rendering empty axes");
    }

    let rendered = render_figure(&figure, &settings.output_file, settings.dpi)?;
    println!("{}", report::saved_line(&rendered));

    Ok(())
}
