use crate::numeric_tensor_tests::{rows_of, scalar_of, tensor_of};
use tiny_tensor::dtype::DType;
use tiny_tensor::numeric_tensor::{NumericTensor, NumericTensorError};

pub fn test_add_scalar(dtype: DType) {
    let tensor = tensor_of(&[&[0, 0], &[0, 2]], dtype);
    let result = tensor.add(scalar_of(3, dtype)).unwrap();
    assert_eq!(result.dtype(), dtype);
    assert_eq!(result.to_rows(), rows_of(&[&[3, 3], &[3, 5]], dtype));
    // The receiver is untouched.
    assert_eq!(tensor.to_rows(), rows_of(&[&[0, 0], &[0, 2]], dtype));
}

pub fn test_add_at_accumulates(dtype: DType) {
    let mut tensor = NumericTensor::zeros(3, 5, dtype).unwrap();
    tensor.set(1, Some(1), scalar_of(2, dtype)).unwrap();
    tensor.add_at(1, Some(1), scalar_of(3, dtype)).unwrap();
    tensor.add_at(1, Some(1), scalar_of(1, dtype)).unwrap();
    assert_eq!(tensor.value_at(1, 1).unwrap(), scalar_of(6, dtype));
    assert_eq!(tensor.sum().item().unwrap(), scalar_of(6, dtype));
}

pub fn test_add_with_non_scalar_tensor(dtype: DType) {
    let tensor = NumericTensor::zeros(2, 2, dtype).unwrap();
    let other = NumericTensor::zeros(2, 2, dtype).unwrap();
    assert!(matches!(
        tensor.add(&other),
        Err(NumericTensorError::InvalidOperand((2, 2)))
    ));
    assert!(matches!(
        tensor.div(other),
        Err(NumericTensorError::InvalidOperand((2, 2)))
    ));

    let cell = tensor_of(&[&[4]], dtype);
    let result = tensor.add(&cell).unwrap();
    assert_eq!(result.to_rows(), rows_of(&[&[4, 4], &[4, 4]], dtype));
}

pub fn test_sum(dtype: DType) {
    let tensor = tensor_of(&[&[1, 2], &[3, 4]], dtype);
    let sum = tensor.sum();
    assert_eq!(sum.shape(), (1, 1));
    assert_eq!(sum.dtype(), dtype);
    assert_eq!(sum.item().unwrap(), scalar_of(10, dtype));
}

pub fn test_item_requires_single_cell(dtype: DType) {
    let tensor = NumericTensor::zeros(1, 2, dtype).unwrap();
    assert!(matches!(
        tensor.item(),
        Err(NumericTensorError::ShapeMismatch { expected: (1, 1), actual: (1, 2) })
    ));
}
