use crate::{AngleUnit, RegistrationPose};

/// Display string for a single registration entry.
pub fn pose_summary(pose: &RegistrationPose, unit: AngleUnit) -> String {
    let mut summary = format!(
        "X: {} mm, Y: {} mm, Z: {} mm\n",
        pose.translation[0], pose.translation[1], pose.translation[2]
    );
    match unit {
        AngleUnit::Radians => summary.push_str(&format!(
            "RX: {} rad, RY: {} rad, RZ: {} rad",
            pose.rotation[0], pose.rotation[1], pose.rotation[2]
        )),
        AngleUnit::Degrees => summary.push_str(&format!(
            "RX: {}°, RY: {}°, RZ: {}°",
            pose.rotation[0], pose.rotation[1], pose.rotation[2]
        )),
    }
    summary
}

pub fn print_poses(poses: &[RegistrationPose], unit: AngleUnit) {
    println!("=== Registration Results ===");
    for (index, pose) in poses.iter().enumerate() {
        println!("Image {}:", index);
        println!("{}", pose_summary(pose, unit));
        if pose.cost != 0.0 {
            println!("Cost: {}", pose.cost);
        }
        println!();
    }
}

pub fn print_pose_table(poses: &[RegistrationPose], unit: AngleUnit) {
    let angle = match unit {
        AngleUnit::Radians => "rad",
        AngleUnit::Degrees => "°",
    };
    println!(
        "| Image | X (mm) | Y (mm) | Z (mm) | Rx ({a}) | Ry ({a}) | Rz ({a}) | Cost |",
        a = angle
    );
    println!("|-------|--------|--------|--------|--------|--------|--------|------|");
    for (index, pose) in poses.iter().enumerate() {
        println!(
            "| {} | {:.3} | {:.3} | {:.3} | {:.4} | {:.4} | {:.4} | {:.3} |",
            index,
            pose.translation[0],
            pose.translation[1],
            pose.translation[2],
            pose.rotation[0],
            pose.rotation[1],
            pose.rotation[2],
            pose.cost
        );
    }
}
