// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Model assembly from configuration to displayable parts

mod assembler;
pub mod bindings;
pub mod materials;

pub use assembler::{
    compute, instances, CacheStats, Model, ModelAssembler, Shell, Surface, SKI_PAIR_OFFSET,
};
pub use bindings::Part;
pub use materials::{MaterialSet, MaterialSpec};
