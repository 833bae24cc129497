// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Decorative binding hardware
//!
//! Bindings are built from primitives in a local frame and placed with
//! nested group transforms (translate, then XYZ Euler rotation, then scale).

use super::materials::{self, trim, MaterialSpec};
use crate::config::{Configuration, EquipmentKind};
use crate::geometry::{Mesh, Primitive};
use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Snowboard bindings sit this fraction of the length from the centre
pub const STANCE_FRACTION: f64 = 0.175;
/// Stance angle of each snowboard binding, in radians
pub const STANCE_ANGLE: f64 = PI / 12.0;
pub const SNOWBOARD_BINDING_SCALE: f64 = 1.25;

/// One rigid piece of hardware in model space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub mesh: Mesh,
    pub material: MaterialSpec,
}

/// Translation followed by an XYZ-ordered Euler rotation
pub fn placement(position: [f64; 3], rotation: [f64; 3]) -> Matrix4<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation[0]);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation[1]);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation[2]);
    Matrix4::new_translation(&Vector3::from(position)) * (rx * ry * rz).to_homogeneous()
}

fn translation(position: [f64; 3]) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::from(position))
}

/// Collects parts under a stack of group transforms
struct Builder {
    stack: Vec<Matrix4<f64>>,
    parts: Vec<Part>,
}

impl Builder {
    fn new(root: Matrix4<f64>) -> Self {
        Self {
            stack: vec![root],
            parts: Vec::new(),
        }
    }

    fn current(&self) -> Matrix4<f64> {
        self.stack.last().copied().unwrap_or_else(Matrix4::identity)
    }

    fn group(&mut self, local: Matrix4<f64>, build: impl FnOnce(&mut Self)) {
        let world = self.current() * local;
        self.stack.push(world);
        build(self);
        self.stack.pop();
    }

    fn part(&mut self, name: &str, primitive: Primitive, local: Matrix4<f64>, material: &MaterialSpec) {
        let mut mesh = primitive.to_mesh();
        mesh.transform(&(self.current() * local));
        self.parts.push(Part {
            name: name.to_string(),
            mesh,
            material: material.clone(),
        });
    }

    fn cuboid(&mut self, name: &str, size: [f64; 3], local: Matrix4<f64>, material: &MaterialSpec) {
        self.part(name, Primitive::cuboid(Vector3::from(size)), local, material);
    }
}

/// All binding parts for a configuration, in single-instance model space
pub fn build(config: &Configuration) -> Vec<Part> {
    let chassis = materials::chassis(config.binding_material, config.binding_color);
    let heelcup = materials::heelcup(config.binding_material, config.binding_color);
    let strap = materials::strap(config.strap_texture, config.strap_color);

    match config.kind {
        EquipmentKind::Snowboard => {
            let half_stance = config.length / 10.0 * STANCE_FRACTION;
            let scale = Matrix4::new_scaling(SNOWBOARD_BINDING_SCALE);
            let mut parts = Vec::new();
            for (z, angle) in [(-half_stance, STANCE_ANGLE), (half_stance, -STANCE_ANGLE)] {
                let root = placement([0.0, 0.25, z], [0.0, angle, 0.0]) * scale;
                parts.extend(snowboard_binding(root, &chassis, &heelcup, &strap));
            }
            parts
        }
        EquipmentKind::Ski => {
            let accent = MaterialSpec::new("accent", config.strap_color, 0.5, 0.5);
            let brake = MaterialSpec::new("brake", config.strap_color, 0.0, 1.0);
            alpine_binding(&chassis, &accent, &brake)
        }
    }
}

fn snowboard_binding(
    root: Matrix4<f64>,
    chassis: &MaterialSpec,
    heelcup: &MaterialSpec,
    strap: &MaterialSpec,
) -> Vec<Part> {
    let mut b = Builder::new(root);
    let shell = chassis.clone().double_sided();
    let padding = strap.clone().double_sided();

    // Baseplate
    b.group(translation([0.0, 0.1, 0.0]), |b| {
        b.cuboid("floor", [1.6, 0.08, 2.2], Matrix4::identity(), chassis);
        b.cuboid("rail", [0.12, 0.3, 1.8], translation([0.75, 0.15, 0.0]), chassis);
        b.cuboid("rail", [0.12, 0.3, 1.8], translation([-0.75, 0.15, 0.0]), chassis);

        b.group(translation([0.0, 0.2, 0.9]), |b| {
            b.cuboid("heel_loop", [1.7, 0.4, 0.15], Matrix4::identity(), heelcup);
            b.cuboid("heel_connector", [0.1, 0.4, 0.8], translation([0.8, 0.0, -0.4]), heelcup);
            b.cuboid("heel_connector", [0.1, 0.4, 0.8], translation([-0.8, 0.0, -0.4]), heelcup);
        });

        b.part(
            "disc",
            Primitive::cylinder(0.55, 0.55, 0.02, 32),
            translation([0.0, 0.05, 0.0]),
            &trim::disc(),
        );

        b.group(translation([0.0, 0.1, 0.0]), |b| {
            b.cuboid("footbed", [1.5, 0.1, 2.3], translation([0.0, 0.05, 0.0]), &trim::footbed());
            b.cuboid(
                "gas_pedal",
                [1.5, 0.12, 0.6],
                placement([0.0, 0.07, -1.0], [0.15, 0.0, 0.0]),
                &trim::footbed(),
            );
        });
    });

    // Highback
    b.group(placement([0.0, 0.5, 0.9], [0.15, 0.0, 0.0]), |b| {
        b.part(
            "highback",
            Primitive::arc_shell(0.7, 0.6, 1.4, 32, -PI / 3.0, 2.0 * PI / 3.0),
            placement([0.0, 0.7, 0.0], [0.0, PI, 0.0]),
            &shell,
        );
        b.cuboid(
            "spine",
            [0.3, 1.0, 0.15],
            placement([0.0, 0.5, 0.6], [-0.1, 0.0, 0.0]),
            chassis,
        );
        b.part(
            "padding",
            Primitive::arc_shell(0.68, 0.58, 1.35, 32, -PI / 3.0, 2.0 * PI / 3.0),
            placement([0.0, 0.7, -0.02], [0.0, PI, 0.0]),
            &padding,
        );
        b.cuboid("lean_adjuster", [0.2, 0.2, 0.1], translation([0.0, 0.1, 0.65]), &trim::adjuster());
    });

    // Straps
    b.group(placement([0.0, 0.9, 0.1], [0.4, 0.0, 0.0]), |b| {
        b.part(
            "ankle_strap",
            Primitive::arc_shell(0.85, 0.85, 0.5, 24, 0.0, PI),
            Matrix4::identity(),
            &padding,
        );
        b.cuboid(
            "ankle_buckle",
            [0.3, 0.15, 0.2],
            placement([0.8, -0.1, 0.0], [0.0, 0.0, 0.5]),
            &trim::buckle(),
        );
    });
    b.group(placement([0.0, 0.4, -1.0], [1.3, 0.0, 0.0]), |b| {
        b.part(
            "toe_strap",
            Primitive::arc_shell(0.7, 0.7, 0.35, 24, 0.0, PI),
            Matrix4::identity(),
            &padding,
        );
        b.cuboid(
            "toe_buckle",
            [0.3, 0.15, 0.2],
            placement([0.7, 0.0, 0.0], [0.0, 0.0, 0.5]),
            &trim::buckle(),
        );
    });

    b.parts
}

fn alpine_binding(chassis: &MaterialSpec, accent: &MaterialSpec, brake: &MaterialSpec) -> Vec<Part> {
    let mut b = Builder::new(translation([0.0, 0.3, 0.0]));

    // Toe piece
    b.group(translation([0.0, 0.0, -1.2]), |b| {
        b.cuboid("toe_housing", [0.7, 0.3, 0.9], translation([0.0, 0.1, 0.0]), chassis);
        b.cuboid(
            "toe_wing",
            [0.2, 0.25, 0.6],
            placement([0.3, 0.15, 0.3], [0.0, -0.5, 0.0]),
            accent,
        );
        b.cuboid(
            "toe_wing",
            [0.2, 0.25, 0.6],
            placement([-0.3, 0.15, 0.3], [0.0, 0.5, 0.0]),
            accent,
        );
        b.cuboid("afd_pad", [0.3, 0.02, 0.4], translation([0.0, 0.26, -0.2]), &trim::pad());
    });

    // Heel piece with brake
    b.group(translation([0.0, 0.0, 1.2]), |b| {
        b.cuboid("heel_housing", [0.7, 0.6, 0.8], translation([0.0, 0.25, 0.0]), chassis);
        b.cuboid(
            "heel_cup",
            [0.6, 0.1, 0.4],
            placement([0.0, 0.4, -0.3], [0.2, 0.0, 0.0]),
            &trim::rubber(),
        );
        b.cuboid(
            "heel_lever",
            [0.5, 0.1, 0.6],
            placement([0.0, 0.5, 0.3], [-0.2, 0.0, 0.0]),
            &trim::lever(),
        );

        b.group(translation([0.0, -0.1, 0.0]), |b| {
            b.part(
                "brake_arm",
                Primitive::cylinder(0.04, 0.04, 0.8, 8),
                placement([0.45, 0.0, 0.1], [0.0, 0.0, 0.5]),
                &trim::rubber(),
            );
            b.part(
                "brake_arm",
                Primitive::cylinder(0.04, 0.04, 0.8, 8),
                placement([-0.45, 0.0, 0.1], [0.0, 0.0, -0.5]),
                &trim::rubber(),
            );
            b.cuboid(
                "brake_pedal",
                [0.6, 0.05, 0.4],
                placement([0.0, 0.1, 0.1], [0.3, 0.0, 0.0]),
                brake,
            );
        });
    });

    b.cuboid("plate", [0.6, 0.08, 2.8], translation([0.0, -0.1, 0.0]), &trim::plate());

    b.parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_placement_order() {
        // Rotation applies in the local frame before the translation
        let m = placement([1.0, 0.0, 0.0], [0.0, PI / 2.0, 0.0]);
        let p = m.transform_point(&nalgebra::Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_snowboard_stance() {
        let config = Configuration::preset(EquipmentKind::Snowboard);
        let parts = build(&config);
        let discs: Vec<_> = parts.iter().filter(|p| p.name == "disc").collect();
        assert_eq!(discs.len(), 2);

        let half_stance = 156.0 / 10.0 * STANCE_FRACTION;
        let mut centres: Vec<f64> = discs.iter().map(|d| d.mesh.bounding_box().center().z).collect();
        centres.sort_by(|a, b| a.total_cmp(b));
        assert_relative_eq!(centres[0], -half_stance, epsilon = 1e-9);
        assert_relative_eq!(centres[1], half_stance, epsilon = 1e-9);
    }

    #[test]
    fn test_ski_has_toe_heel_and_plate() {
        let parts = build(&Configuration::default());
        for name in ["toe_housing", "heel_housing", "plate"] {
            assert!(parts.iter().any(|p| p.name == name), "missing {name}");
        }
        let plate = parts.iter().find(|p| p.name == "plate").unwrap();
        assert_relative_eq!(plate.mesh.bounding_box().size().z, 2.8, epsilon = 1e-12);
    }

    #[test]
    fn test_binding_materials_follow_config() {
        let mut config = Configuration::preset(EquipmentKind::Snowboard);
        config.binding_material = crate::config::BindingMaterial::Aluminum;
        let parts = build(&config);
        let floor = parts.iter().find(|p| p.name == "floor").unwrap();
        assert_eq!(floor.material.metalness, 0.8);
        assert!(parts.iter().find(|p| p.name == "highback").unwrap().material.double_sided);
    }
}
