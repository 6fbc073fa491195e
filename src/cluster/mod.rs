//! Transporter group construction

pub mod detection;
pub mod hubs;
pub mod metrics;

use serde::{Deserialize, Serialize};

/// A transporter group: one connected component of the pruned family graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Sequence number; the label is `T{id}`
    pub id: u32,

    /// Member family indices in traversal order
    pub members: Vec<u32>,

    /// Size of the cluster
    pub size: usize,

    /// Density: internal links / possible links
    pub density: f32,
}

impl Cluster {
    /// Printable identifier, `T0`, `T1`, ...
    pub fn label(&self) -> String {
        format!("T{}", self.id)
    }
}

/// A family excluded from clustering for having too many partners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubFamily {
    pub family: u32,

    /// Distinct partners at the moment the family was removed
    pub degree: usize,
}
