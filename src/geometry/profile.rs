// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Longitudinal profile: camber, rocker and tip/tail kick
//!
//! Everything here is a pure function of normalized longitudinal position
//! `p` in [-1, 1], with the tip at `p = -1`.

use crate::config::{CamberProfile, TailShape};
use std::f64::consts::PI;

const CAMBER_EXTENT: f64 = 0.7;
const CAMBER_HEIGHT: f64 = 0.5;

const ROCKER_EXPONENT: f64 = 2.5;
const ROCKER_HEIGHT: f64 = 1.5;

const HYBRID_EXTENT: f64 = 0.4;
const HYBRID_HEIGHT: f64 = 0.2;
const HYBRID_RISE: f64 = 3.0;

const KICK_START: f64 = 0.75;
const TIP_KICK: f64 = 15.0;

const TAPER: f64 = 0.6;

/// Vertical displacement and thickness multiplier at one station
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elevation {
    pub dy: f64,
    pub thickness_scale: f64,
}

/// Profile shape for one configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileDeformer {
    pub profile: CamberProfile,
    pub tail_shape: TailShape,
}

impl ProfileDeformer {
    pub fn new(profile: CamberProfile, tail_shape: TailShape) -> Self {
        Self {
            profile,
            tail_shape,
        }
    }

    pub fn elevation(&self, p: f64) -> Elevation {
        elevation(p, self.profile, self.tail_shape)
    }
}

/// Elevation at normalized position `p`, clamped to [-1, 1]
pub fn elevation(p: f64, profile: CamberProfile, tail_shape: TailShape) -> Elevation {
    let p = if p.is_nan() { 0.0 } else { p.clamp(-1.0, 1.0) };
    Elevation {
        dy: base_height(p, profile) + kick(p, tail_shape),
        thickness_scale: thickness_scale(p),
    }
}

/// Profile term without kick
pub fn base_height(p: f64, profile: CamberProfile) -> f64 {
    let ap = p.abs();
    match profile {
        CamberProfile::Camber => {
            if ap < CAMBER_EXTENT {
                (p * PI / (2.0 * CAMBER_EXTENT)).cos() * CAMBER_HEIGHT
            } else {
                0.0
            }
        }
        CamberProfile::Rocker => ap.powf(ROCKER_EXPONENT) * ROCKER_HEIGHT,
        CamberProfile::Hybrid => {
            let inner = |x: f64| (x * 1.2 * PI).cos() * HYBRID_HEIGHT;
            if ap < HYBRID_EXTENT {
                inner(p)
            } else {
                // Carry the seam value so both branches meet
                let excess = ap - HYBRID_EXTENT;
                inner(HYBRID_EXTENT) + excess * excess * HYBRID_RISE
            }
        }
    }
}

/// Tip/tail upturn past `|p| = 0.75`
pub fn kick(p: f64, tail_shape: TailShape) -> f64 {
    let ap = p.abs();
    if ap <= KICK_START {
        return 0.0;
    }
    let excess = ap - KICK_START;
    excess * excess * kick_coefficient(p, tail_shape)
}

/// Kick strength: the tip is always fully turned up, the tail depends on its shape
pub fn kick_coefficient(p: f64, tail_shape: TailShape) -> f64 {
    if p < 0.0 {
        return TIP_KICK;
    }
    match tail_shape {
        TailShape::Twin => 15.0,
        TailShape::Partial => 8.0,
        TailShape::Flat => 2.0,
    }
}

/// Thickness multiplier, 1 at the centre and 0.4 at the extremities
pub fn thickness_scale(p: f64) -> f64 {
    1.0 - p.abs().powi(3) * TAPER
}
