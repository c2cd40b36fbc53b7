// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;
use std::time::Instant;

use crate::cli::args::VisualizeArgs;
use crate::visualize::{VisualizeJob, run};
use crate::visualizer::Topology;
use crate::{VERSION, error, section, success, verbose, warn};

/// Run the `visualize` command, exiting with status 1 on failure.
#[allow(clippy::cast_precision_loss)]
pub fn run_visualize(args: &VisualizeArgs) {
    let topology = Topology::for_dataset(args.dataset);
    let job = VisualizeJob::new(
        args.dataset,
        args.label_type,
        &args.data_root,
        &args.output,
    )
    .with_format(args.format)
    .with_config(args.render_config());

    section!("MBW label visualization {VERSION}");
    verbose!(
        "dataset={} labels={} color={} format={} range_scale={}",
        args.dataset,
        args.label_type,
        args.color,
        args.format,
        topology.range_scale
    );

    let start = Instant::now();
    let summary = match run(&job) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed().as_secs_f64();

    for (frame_idx, e) in &summary.failed {
        error!("frame {frame_idx}: {e}");
    }
    if summary.skipped > 0 {
        verbose!(
            "Skipped {} frames without a 3D reconstruction",
            summary.skipped
        );
    }

    let rendered = summary.saved.len();
    verbose!(
        "Rendered {rendered} frames in {elapsed:.1}s ({:.1}ms per frame)",
        elapsed * 1000.0 / rendered.max(1) as f64
    );

    if summary.failed.is_empty() {
        success!(
            "Finished the visualization of {} labels, saved to {}",
            args.label_type,
            summary.save_dir.display()
        );
    } else {
        warn!(
            "{} of {} frames failed",
            summary.failed.len(),
            rendered + summary.failed.len()
        );
        process::exit(1);
    }
}
