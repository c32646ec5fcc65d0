//! Spatial-subsystem error type.

use thiserror::Error;

use fp_core::NodeId;

/// Errors produced by `fp-spatial` routing.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
