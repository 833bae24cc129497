// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the synthesis pipeline and the suggestion client

use std::time::Duration;
use thiserror::Error;

/// Failures while building an outline or extruding it into a solid.
///
/// Geometry errors abort the current recomputation; the previously assembled
/// model stays in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid dimension `{field}`: {value} (must be a positive, finite number)")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("outline is not closed (gap {gap:.6})")]
    NotClosed { gap: f64 },

    #[error("outline self-intersects between edges {first} and {second}")]
    SelfIntersecting { first: usize, second: usize },

    #[error("cap triangulation failed: {0}")]
    Triangulation(String),
}

/// Failures while allocating or rasterizing the surface texture.
///
/// The assembler recovers from these with a flat base-color fill.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    #[error("invalid texture resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("texture of {pixels} pixels exceeds the limit of {limit}")]
    TooLarge { pixels: u64, limit: u64 },
}

/// Failures reported by the external specification generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalServiceError {
    #[error("connection error: {0}")]
    Transport(String),

    #[error("unparseable response: {0}")]
    Malformed(String),

    #[error("no response text")]
    Empty,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

impl ExternalServiceError {
    /// Message suitable for showing next to the prompt box.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Connection Error. Please check API Key.".to_string(),
            Self::Timeout(_) => "The design assistant took too long to answer. Please try again.".to_string(),
            Self::Cancelled => "Request cancelled.".to_string(),
            Self::Malformed(_) | Self::Empty => {
                "The design assistant returned an unreadable answer.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_names_field() {
        let err = GeometryError::InvalidDimension {
            field: "waistWidth",
            value: -3.0,
        };
        assert!(err.to_string().contains("waistWidth"));
    }

    #[test]
    fn test_transport_user_message() {
        let err = ExternalServiceError::Transport("dns".into());
        assert_eq!(err.user_message(), "Connection Error. Please check API Key.");
    }
}
