use crate::numeric_tensor_tests::{rows_of, tensor_of};
use tiny_tensor::dtype::DType;

pub fn test_cast_to_own_kind_is_identity(dtype: DType) {
    let tensor = tensor_of(&[&[1, 0, 3]], dtype);
    assert_eq!(tensor.cast(dtype).unwrap(), tensor);
}

pub fn test_cast_preserves_small_integers(dtype: DType) {
    let tensor = tensor_of(&[&[1, -2], &[0, 40]], dtype);
    for target in DType::supported() {
        let converted = tensor.cast(target).unwrap();
        assert_eq!(converted.dtype(), target);
        assert_eq!(converted.shape(), (2, 2));
        assert_eq!(converted.to_rows(), rows_of(&[&[1, -2], &[0, 40]], target));
    }
}
