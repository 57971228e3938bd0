use tiny_tensor::dtype::DType;
use tiny_tensor::numeric_scalar::NumericScalar;
use tiny_tensor::numeric_tensor::NumericTensor;

pub mod arith;
pub mod construction;
pub mod conversion;
pub mod indexing;

/// `value` expressed in `dtype`.
fn scalar_of(value: i32, dtype: DType) -> NumericScalar {
    NumericScalar::I32(value).cast(dtype).unwrap()
}

fn zero_of(dtype: DType) -> NumericScalar {
    NumericScalar::zero_of(dtype).unwrap()
}

/// Tensor of `dtype` holding the given integer rows.
fn tensor_of(rows: &[&[i32]], dtype: DType) -> NumericTensor {
    NumericTensor::from_rows::<i32, &[i32]>(rows).unwrap().cast(dtype).unwrap()
}

fn rows_of(rows: &[&[i32]], dtype: DType) -> Vec<Vec<NumericScalar>> {
    rows.iter()
        .map(|row| row.iter().map(|x| scalar_of(*x, dtype)).collect())
        .collect()
}
