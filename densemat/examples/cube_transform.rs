//! Transform the vertices of a cube with scale, rotation and translation

use std::f64::consts::PI;

use densemat::{Affine, Matrix};

fn main() -> densemat::Result<()> {
    // one vertex per column
    let cube = Matrix::from_row_major(
        3,
        8,
        &[
            -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, //
            -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, //
            -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0,
        ],
    )?;
    println!("Cube vertices:\n{cube}\n");

    let mut transform = Affine::identity(3)?;
    transform.scale(0.8);
    transform.rotate(0.25 * PI, &[1.0, 0.0, 0.0])?;
    transform.translate(&[1.5, 10.2, -5.1])?;
    println!("Transform:\n{transform:.5}\n");

    let moved = transform.apply_points(&cube)?;
    println!("Transformed vertices (homogeneous):\n{moved:.5}\n");
    println!("Transformed vertices:\n{:.5}", moved.colwise_dehomogenize()?);

    Ok(())
}
