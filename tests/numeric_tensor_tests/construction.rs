use crate::numeric_tensor_tests::zero_of;
use tiny_tensor::dtype::DType;
use tiny_tensor::numeric_tensor::{NumericTensor, NumericTensorError};

pub fn test_zeros_shape_and_values(dtype: DType) {
    let tensor = NumericTensor::zeros(3, 5, dtype).unwrap();
    assert_eq!(tensor.dtype(), dtype);
    assert_eq!(tensor.shape(), (3, 5));
    assert_eq!(tensor.rows(), 3);
    assert_eq!(tensor.cols(), 5);
    let zero = zero_of(dtype);
    assert_eq!(tensor.to_rows(), vec![vec![zero; 5]; 3]);
}

pub fn test_vector_is_single_row(dtype: DType) {
    let tensor = NumericTensor::vector(4, dtype).unwrap();
    assert_eq!(tensor.shape(), (1, 4));
    assert_eq!(tensor, NumericTensor::zeros(1, 4, dtype).unwrap());
}

pub fn test_empty_shape_rejected(dtype: DType) {
    assert!(matches!(
        NumericTensor::zeros(0, 5, dtype),
        Err(NumericTensorError::EmptyShape((0, 5)))
    ));
    assert!(matches!(
        NumericTensor::zeros(2, 0, dtype),
        Err(NumericTensorError::EmptyShape((2, 0)))
    ));
}
