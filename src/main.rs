// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use mbw_label_vis::cli::args::{Cli, Commands};
use mbw_label_vis::cli::datasets::run_datasets;
use mbw_label_vis::cli::logging::set_verbose;
use mbw_label_vis::cli::visualize::run_visualize;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Visualize(args) => {
            set_verbose(args.verbose);
            run_visualize(args);
        }
        Commands::Datasets => run_datasets(),
    }
}
