//! Walk through construction, access and arithmetic on dense matrices

use densemat::{Matrix, Matrix3, MatrixError, Vector3};

fn main() -> densemat::Result<()> {
    // Row-major input, column-major storage
    let m = Matrix::comma(3, 3)?
        .extend([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
        .finish()?;
    println!("m =\n{m}");
    println!("storage order: {:?}", m.as_slice());

    // Element access is checked
    println!("m(1, 2) = {}", m.get(1, 2)?);
    match m.get(3, 0) {
        Err(e @ MatrixError::OutOfRange { .. }) => println!("m(3, 0) -> {e}"),
        other => println!("unexpected: {other:?}"),
    }

    // Identity
    let b = Matrix3::<f64>::identity();
    println!("\nB =\n{b}");
    println!("B(1, 2) = {}, B(1, 1) = {}", b[(1, 2)], b[(1, 1)]);

    // Arithmetic; runtime shapes return Result
    let sum = (&m + &Matrix::ones(3, 3)?)?;
    println!("\nm + 1 =\n{sum}");
    let product = (&m * &m.transpose())?;
    println!("\nm * m^T =\n{product}");
    if let Err(e) = &m * &Matrix::<f64>::zeros(2, 2)? {
        println!("m * zeros(2, 2) -> {e}");
    }

    // Elementwise
    println!("\nm .* m =\n{}", m.component_mul(&m)?);
    println!("\nm > 4 =\n{}", m.elementwise_gt(&Matrix::constant(3, 3, 4.0)?)?);

    // Inverse, with poisoning for singular input
    let singular = m.inverse()?;
    println!("\ninverse of singular m has NaN: {}", singular.has_nan());
    let a = Matrix::from_row_major(2, 2, &[4.0, 7.0, 2.0, 6.0])?;
    println!("a^-1 =\n{:.3}", a.inverse()?);

    // Vectors
    let v = Vector3::new(1.0, 2.0, 3.0);
    let w = Vector3::new(0.0, 1.0, 0.0);
    println!("\nv . w = {}", v.dot(&w));
    println!("v x w = {:?}", v.cross(&w).as_slice());
    println!("|v| = {:.5}", v.norm());
    println!("v normalized = {:?}", v.normalized().as_slice());
    println!("v homogeneous = {:?}", v.to_homogeneous().as_slice());

    Ok(())
}
