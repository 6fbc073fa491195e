//! Family graph construction: links, weights, filtering and adjacency

pub mod algorithms;
pub mod builder;
pub mod compressed;
pub mod filter;
pub mod links;
pub mod weights;

pub use compressed::CompressedGraph;
pub use filter::FilteredLinks;
pub use links::{EntityLinks, Link};
pub use weights::EdgeWeights;
