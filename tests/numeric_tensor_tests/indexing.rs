use crate::numeric_tensor_tests::{rows_of, scalar_of, zero_of};
use tiny_tensor::dtype::DType;
use tiny_tensor::numeric_tensor::{NumericTensor, NumericTensorError};

pub fn test_set_get_cell(dtype: DType) {
    let mut tensor = NumericTensor::zeros(3, 5, dtype).unwrap();
    tensor.set(1, Some(2), scalar_of(3, dtype)).unwrap();

    let cell = tensor.get(1, Some(2)).unwrap();
    assert_eq!(cell.shape(), (1, 1));
    assert_eq!(cell.dtype(), dtype);
    assert_eq!(cell.item().unwrap(), scalar_of(3, dtype));
    assert_eq!(tensor.get_cell(0, 2).unwrap().item().unwrap(), zero_of(dtype));
    assert_eq!(tensor.value_at(1, 2).unwrap(), scalar_of(3, dtype));
}

pub fn test_row_broadcast(dtype: DType) {
    let mut tensor = NumericTensor::zeros(3, 5, dtype).unwrap();
    tensor.set(1, None, scalar_of(4, dtype)).unwrap();
    assert_eq!(
        tensor.to_rows(),
        rows_of(&[&[0, 0, 0, 0, 0], &[4, 4, 4, 4, 4], &[0, 0, 0, 0, 0]], dtype)
    );
}

pub fn test_vector_element_assignment(dtype: DType) {
    let mut tensor = NumericTensor::vector(3, dtype).unwrap();
    tensor.set(1, None, scalar_of(4, dtype)).unwrap();
    assert_eq!(tensor.to_rows(), rows_of(&[&[0, 4, 0]], dtype));

    tensor.set_vector_element(2, scalar_of(5, dtype)).unwrap();
    assert_eq!(tensor.to_rows(), rows_of(&[&[0, 4, 5]], dtype));

    let mut tall = NumericTensor::zeros(2, 3, dtype).unwrap();
    assert!(matches!(
        tall.set_vector_element(0, scalar_of(1, dtype)),
        Err(NumericTensorError::ShapeMismatch { .. })
    ));
}

pub fn test_get_row_copies(dtype: DType) {
    let mut tensor = NumericTensor::zeros(3, 5, dtype).unwrap();
    let row = tensor.get_row(1).unwrap();
    assert_eq!(row.shape(), (1, 5));

    tensor.set(1, Some(0), scalar_of(7, dtype)).unwrap();
    assert_eq!(row.value_at(0, 0).unwrap(), zero_of(dtype));
    assert_eq!(tensor.get(1, None).unwrap().value_at(0, 0).unwrap(), scalar_of(7, dtype));
}

pub fn test_out_of_bounds(dtype: DType) {
    let mut tensor = NumericTensor::zeros(3, 5, dtype).unwrap();
    assert!(matches!(
        tensor.get(3, None),
        Err(NumericTensorError::IndexOutOfBounds { axis: "row", index: 3, len: 3 })
    ));
    assert!(matches!(
        tensor.get(0, Some(5)),
        Err(NumericTensorError::IndexOutOfBounds { axis: "column", index: 5, len: 5 })
    ));
    assert!(matches!(
        tensor.set(0, Some(5), scalar_of(1, dtype)),
        Err(NumericTensorError::IndexOutOfBounds { .. })
    ));
    assert!(matches!(
        tensor.fill_row(7, scalar_of(1, dtype)),
        Err(NumericTensorError::IndexOutOfBounds { .. })
    ));

    let mut vector = NumericTensor::vector(2, dtype).unwrap();
    assert!(matches!(
        vector.set(2, None, scalar_of(1, dtype)),
        Err(NumericTensorError::IndexOutOfBounds { axis: "column", .. })
    ));
}

pub fn test_single_cell_tensor_assignment(dtype: DType) {
    let mut tensor = NumericTensor::zeros(2, 2, dtype).unwrap();
    let mut cell = NumericTensor::zeros(1, 1, dtype).unwrap();
    cell.set(0, Some(0), scalar_of(9, dtype)).unwrap();

    tensor.set(0, Some(1), &cell).unwrap();
    assert_eq!(tensor.value_at(0, 1).unwrap(), scalar_of(9, dtype));

    let wide = NumericTensor::zeros(1, 2, dtype).unwrap();
    assert!(matches!(
        tensor.set(0, Some(0), wide),
        Err(NumericTensorError::InvalidAssignment(_))
    ));
}
