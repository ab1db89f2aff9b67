use core::f32::consts::FRAC_PI_8;
use core::time::Duration;
use nalgebra::UnitQuaternion;
use uf_quat_smooth::{QuaternionAverager, SmoothingParams};

fn main() {
    let mut averager = QuaternionAverager::with_params(SmoothingParams::default());

    // Jittery yaw around pi/8 with uneven frame times
    let frames = [
        (0.02, 16),
        (-0.03, 7),
        (0.01, 33),
        (-0.015, 16),
        (0.025, 12),
        (0.0, 40),
    ];

    for (noise, millis) in frames {
        let sample = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_8 + noise);
        match averager.add_elapsed(sample.into_inner(), Duration::from_millis(millis)) {
            Ok(smoothed) => println!(
                "raw yaw {:.4}  smoothed {:?}",
                FRAC_PI_8 + noise,
                smoothed.euler_angles()
            ),
            Err(err) => eprintln!("smoothing failed: {err}"),
        }
    }
}
