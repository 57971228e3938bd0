pub mod dtype;
pub mod numeric_scalar;
pub mod numeric_tensor;
pub mod numeric_tensor_typed;
pub mod bigram;

pub use dtype::DType;
pub use numeric_scalar::NumericScalar;
pub use numeric_tensor::{NumericTensor, NumericTensorError, TensorOperand};
pub use numeric_tensor_typed::{NumericTensorTyped, Operand, TensorElement};
