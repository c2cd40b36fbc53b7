// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::info;
use crate::visualizer::{IDENTITY, TOPOLOGIES, Topology};

/// One table row describing a registered skeleton.
#[must_use]
pub fn describe(topology: &Topology) -> String {
    let axes = if topology.axis_matrix == IDENTITY {
        "identity".to_string()
    } else {
        format!("{:?}", topology.axis_matrix)
    };
    format!(
        "{:<16}{:>7}{:>7}{:>7}  {axes}",
        topology.dataset.as_str(),
        topology.num_joints,
        topology.num_connections(),
        topology.range_scale,
    )
}

/// Run the `datasets` command.
pub fn run_datasets() {
    info!(
        "{:<16}{:>7}{:>7}{:>7}  axes",
        "dataset", "joints", "bones", "scale"
    );
    for topology in &TOPOLOGIES {
        info!("{}", describe(topology));
    }
}
