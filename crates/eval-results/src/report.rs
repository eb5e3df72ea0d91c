//! Summary lines the binaries print to stdout.

use results_data::merger::MergeOutcome;
use results_plot::RenderedFigure;

pub fn merge_line(outcome: &MergeOutcome) -> String {
    match outcome {
        MergeOutcome::NoParts => "No result parts found".to_string(),
        MergeOutcome::Merged(summary) => format!(
            "Merged {} parts -> {} ({} rows)",
            summary.parts,
            summary.output.display(),
            summary.rows
        ),
    }
}

/// `methods` is rendered as a single-quoted list, e.g. `['vlash', 'naive']`.
pub fn loaded_line(row_count: usize, methods: &[String]) -> String {
    let quoted: Vec<String> = methods.iter().map(|m| format!("'{m}'")).collect();
    format!("Loaded {row_count} rows, methods: [{}]", quoted.join(", "))
}

pub fn saved_line(rendered: &RenderedFigure) -> String {
    format!(
        "Saved: {}, {}",
        rendered.raster.display(),
        rendered.vector.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use results_data::merger::MergeSummary;
    use std::path::PathBuf;

    #[test]
    fn test_merge_line_no_parts() {
        assert_eq!(merge_line(&MergeOutcome::NoParts), "No result parts found");
    }

    #[test]
    fn test_merge_line_merged() {
        let outcome = MergeOutcome::Merged(MergeSummary {
            parts: 3,
            rows: 120,
            output: PathBuf::from("eval_output/results.csv"),
        });
        assert_eq!(
            merge_line(&outcome),
            "Merged 3 parts -> eval_output/results.csv (120 rows)"
        );
    }

    #[test]
    fn test_loaded_line_lists_methods() {
        let methods = vec!["vlash".to_string(), "naive".to_string()];
        assert_eq!(
            loaded_line(10, &methods),
            "Loaded 10 rows, methods: ['vlash', 'naive']"
        );
    }

    #[test]
    fn test_loaded_line_no_methods() {
        assert_eq!(loaded_line(0, &[]), "Loaded 0 rows, methods: []");
    }

    #[test]
    fn test_saved_line() {
        let rendered = RenderedFigure {
            raster: PathBuf::from("out/fig.png"),
            vector: PathBuf::from("out/fig.svg"),
        };
        assert_eq!(saved_line(&rendered), "Saved: out/fig.png, out/fig.svg");
    }
}
