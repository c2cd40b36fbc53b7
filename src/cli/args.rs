// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::RenderConfig;
use crate::dataset::Dataset;
use crate::io::ImageFormat;
use crate::label_type::LabelType;
use crate::visualizer::Color;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r"Examples:
    mbw-label-vis visualize --dataset Chimpanzee --label-type 2D
    mbw-label-vis visualize --dataset Fish --label-type 3D --format jpg
    mbw-label-vis visualize --dataset Tiger --label-type BBox --color red
    mbw-label-vis visualize -d Human -t 2D --only-confident --show-gt
    mbw-label-vis datasets")]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render 2D, 3D or bounding box labels of a dataset
    Visualize(VisualizeArgs),
    /// List the datasets with a registered skeleton
    Datasets,
}

/// Arguments for the visualize command.
#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// Dataset to visualize
    #[arg(short, long, default_value = "Chimpanzee")]
    pub dataset: Dataset,

    /// Labels to render: 2D, 3D or BBox
    #[arg(short = 't', long, default_value = "2D")]
    pub label_type: LabelType,

    /// Directory holding one folder per dataset
    #[arg(long, default_value = "Data")]
    pub data_root: PathBuf,

    /// Directory to store the rendered labels in
    #[arg(short, long, default_value = "Label_Vis")]
    pub output: PathBuf,

    /// Label color (name, rgb(r, g, b) or #rrggbb)
    #[arg(short, long, default_value = "blue")]
    pub color: Color,

    /// Ground-truth color used with --show-gt
    #[arg(long, default_value = "red")]
    pub gt_color: Color,

    /// Output image format: png or jpg
    #[arg(short, long, default_value = "png")]
    pub format: ImageFormat,

    /// Only draw 2D keypoints of confident views
    #[arg(long, default_value_t = false)]
    pub only_confident: bool,

    /// Also draw ground-truth 2D keypoints
    #[arg(long = "show-gt", default_value_t = false)]
    pub show_gt: bool,

    /// Bone line width in pixels
    #[arg(long, default_value_t = 4)]
    pub line_width: u32,

    /// Keypoint marker radius in pixels
    #[arg(long, default_value_t = 6)]
    pub point_radius: i32,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

impl VisualizeArgs {
    /// Rendering configuration described by these arguments.
    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_color(self.color)
            .with_secondary_color(self.gt_color)
            .with_line_width(self.line_width)
            .with_point_radius(self.point_radius)
            .with_only_confident(self.only_confident)
            .with_ground_truth(self.show_gt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_visualize_args_defaults() {
        let args = Cli::parse_from(["app", "visualize"]);
        match args.command {
            Commands::Visualize(args) => {
                assert_eq!(args.dataset, Dataset::Chimpanzee);
                assert_eq!(args.label_type, LabelType::Keypoints2D);
                assert_eq!(args.data_root, PathBuf::from("Data"));
                assert_eq!(args.output, PathBuf::from("Label_Vis"));
                assert_eq!(args.color, Color::BLUE);
                assert_eq!(args.format, ImageFormat::Png);
                assert!(!args.only_confident);
                assert!(args.verbose);
                assert_eq!(args.render_config(), RenderConfig::default());
            }
            Commands::Datasets => panic!("expected visualize"),
        }
    }

    #[test]
    fn test_visualize_args_custom() {
        let args = Cli::parse_from([
            "app",
            "visualize",
            "--dataset",
            "fish",
            "-t",
            "3D",
            "--color",
            "rgb(30, 20, 160)",
            "--format",
            ".jpg",
            "--only-confident",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Visualize(args) => {
                assert_eq!(args.dataset, Dataset::Fish);
                assert_eq!(args.label_type, LabelType::Keypoints3D);
                assert_eq!(args.color, Color(30, 20, 160));
                assert_eq!(args.format, ImageFormat::Jpg);
                assert!(args.render_config().only_confident);
                assert!(!args.verbose);
            }
            Commands::Datasets => panic!("expected visualize"),
        }
    }

    #[test]
    fn test_unknown_dataset_rejected() {
        let result = Cli::try_parse_from(["app", "visualize", "--dataset", "UnknownAnimal"]);
        assert!(result.is_err());
    }
}
