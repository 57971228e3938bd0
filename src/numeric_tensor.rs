use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::dtype::{DType, DTypeError, DTypeOfPrimitive};
use crate::numeric_scalar::NumericScalar;
use crate::numeric_tensor_typed::{NumericTensorTyped, TensorElement};

#[derive(Debug, thiserror::Error)]
pub enum NumericTensorError {
    #[error(transparent)]
    DTypeError(#[from] DTypeError),
    #[error(transparent)]
    ShapeError(#[from] ndarray::ShapeError),
    #[error("Index {index} is out of bounds for {axis} of length {len}")]
    IndexOutOfBounds { axis: &'static str, index: usize, len: usize },
    #[error("Cannot assign {0}")]
    InvalidAssignment(String),
    #[error("Expected shape {expected:?}, but tensor has shape {actual:?}")]
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    #[error("Integer division by zero")]
    DivisionByZero,
    #[error("Tensor operand of shape {0:?} cannot be used as a scalar")]
    InvalidOperand((usize, usize)),
    #[error("Shape {0:?} has no elements")]
    EmptyShape((usize, usize)),
    #[error("Row {row} has {len} elements, expected {expected}")]
    RaggedRows { row: usize, len: usize, expected: usize },
    #[error("Requested dtype {0}, but had dtype {1}")]
    WrongDTypeError(DType, DType),
}

/// A tensor whose element kind is only known at runtime.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub enum NumericTensor {
    F64(NumericTensorTyped<f64>),
    F32(NumericTensorTyped<f32>),
    I32(NumericTensorTyped<i32>),
}

/// Anything a runtime tensor accepts on the right of an assignment or arithmetic
/// operation.
#[derive(Debug, Clone)]
pub enum TensorOperand {
    Scalar(NumericScalar),
    Tensor(NumericTensor),
}

impl TensorOperand {
    fn reduce_to_scalar(self) -> Result<NumericScalar, (usize, usize)> {
        match self {
            TensorOperand::Scalar(x) => Ok(x),
            TensorOperand::Tensor(x) => x.item().map_err(|_| x.shape()),
        }
    }

    /// Arithmetic operands of any supported kind are converted to `T`, truncating
    /// toward zero for `I32`.
    fn arithmetic_value<T: TensorElement>(self) -> Result<T, NumericTensorError> {
        let scalar = self.reduce_to_scalar().map_err(NumericTensorError::InvalidOperand)?;
        Ok(T::cast_from_numeric_scalar(&scalar))
    }

    /// Assigned values must already be of kind `T` or widen to it exactly.
    fn assignment_value<T: TensorElement>(self) -> Result<T, NumericTensorError> {
        let scalar = self.reduce_to_scalar().map_err(|shape| {
            NumericTensorError::InvalidAssignment(format!("a tensor of shape {shape:?} to a single cell"))
        })?;
        let coerced = scalar.coerce_for_assignment(T::DTYPE).ok_or_else(|| {
            NumericTensorError::InvalidAssignment(format!("{} value {scalar} to a {} tensor", scalar.dtype(), T::DTYPE))
        })?;
        Ok(T::cast_from_numeric_scalar(&coerced))
    }
}

impl From<NumericScalar> for TensorOperand {
    fn from(value: NumericScalar) -> Self {
        TensorOperand::Scalar(value)
    }
}

impl From<f64> for TensorOperand {
    fn from(value: f64) -> Self {
        TensorOperand::Scalar(value.into())
    }
}

impl From<f32> for TensorOperand {
    fn from(value: f32) -> Self {
        TensorOperand::Scalar(value.into())
    }
}

impl From<i32> for TensorOperand {
    fn from(value: i32) -> Self {
        TensorOperand::Scalar(value.into())
    }
}

impl From<NumericTensor> for TensorOperand {
    fn from(value: NumericTensor) -> Self {
        TensorOperand::Tensor(value)
    }
}

impl From<&NumericTensor> for TensorOperand {
    fn from(value: &NumericTensor) -> Self {
        TensorOperand::Tensor(value.clone())
    }
}

impl NumericTensor {
    pub fn zeros(rows: usize, cols: usize, dtype: DType) -> Result<Self, NumericTensorError> {
        Ok(match dtype.ensure_supported()? {
            DType::F64 => NumericTensor::F64(NumericTensorTyped::zeros(rows, cols)?),
            DType::F32 => NumericTensor::F32(NumericTensorTyped::zeros(rows, cols)?),
            DType::I32 => NumericTensor::I32(NumericTensorTyped::zeros(rows, cols)?),
            _ => Err(DTypeError::UnsupportedKind(dtype))?,
        })
    }

    /// Zero tensor whose kind is named by a Rust primitive, e.g. `zeros_of::<i32>(27, 27)`.
    pub fn zeros_of<P: DTypeOfPrimitive>(rows: usize, cols: usize) -> Result<Self, NumericTensorError> {
        Self::zeros(rows, cols, P::DTYPE)
    }

    pub fn vector(cols: usize, dtype: DType) -> Result<Self, NumericTensorError> {
        Self::zeros(1, cols, dtype)
    }

    pub fn of<T: TensorElement>(values: Vec<T>) -> Result<Self, NumericTensorError> {
        Ok(NumericTensorTyped::of(values)?.into())
    }

    pub fn from_rows<T: TensorElement, R: AsRef<[T]>>(rows: &[R]) -> Result<Self, NumericTensorError> {
        Ok(NumericTensorTyped::from_rows(rows)?.into())
    }

    pub fn dtype(&self) -> DType {
        match self {
            NumericTensor::F64(x) => x.dtype(),
            NumericTensor::F32(x) => x.dtype(),
            NumericTensor::I32(x) => x.dtype(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        match self {
            NumericTensor::F64(x) => x.shape(),
            NumericTensor::F32(x) => x.shape(),
            NumericTensor::I32(x) => x.shape(),
        }
    }

    pub fn rows(&self) -> usize {
        self.shape().0
    }

    pub fn cols(&self) -> usize {
        self.shape().1
    }

    pub fn as_typed<T: TensorElement>(&self) -> Result<&NumericTensorTyped<T>, NumericTensorError> {
        T::typed_ref(self)
    }

    pub fn to_rows(&self) -> Vec<Vec<NumericScalar>> {
        fn convert<T: TensorElement>(x: &NumericTensorTyped<T>) -> Vec<Vec<NumericScalar>> {
            x.to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(|v| v.to_numeric_scalar()).collect())
                .collect()
        }
        match self {
            NumericTensor::F64(x) => convert(x),
            NumericTensor::F32(x) => convert(x),
            NumericTensor::I32(x) => convert(x),
        }
    }

    pub fn value_at(&self, row: usize, col: usize) -> Result<NumericScalar, NumericTensorError> {
        Ok(match self {
            NumericTensor::F64(x) => x.value_at(row, col)?.into(),
            NumericTensor::F32(x) => x.value_at(row, col)?.into(),
            NumericTensor::I32(x) => x.value_at(row, col)?.into(),
        })
    }

    pub fn get(&self, row: usize, col: Option<usize>) -> Result<Self, NumericTensorError> {
        Ok(match self {
            NumericTensor::F64(x) => NumericTensor::F64(x.get(row, col)?),
            NumericTensor::F32(x) => NumericTensor::F32(x.get(row, col)?),
            NumericTensor::I32(x) => NumericTensor::I32(x.get(row, col)?),
        })
    }

    pub fn get_row(&self, row: usize) -> Result<Self, NumericTensorError> {
        self.get(row, None)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<Self, NumericTensorError> {
        self.get(row, Some(col))
    }

    /// See [`NumericTensorTyped::set`]. Values of another kind are accepted when they
    /// widen exactly (`I32` into `F32`/`F64`, `F32` into `F64`).
    pub fn set(&mut self, row: usize, col: Option<usize>, value: impl Into<TensorOperand>) -> Result<(), NumericTensorError> {
        let value = value.into();
        match self {
            NumericTensor::F64(x) => x.set(row, col, value.assignment_value::<f64>()?),
            NumericTensor::F32(x) => x.set(row, col, value.assignment_value::<f32>()?),
            NumericTensor::I32(x) => x.set(row, col, value.assignment_value::<i32>()?),
        }
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<TensorOperand>) -> Result<(), NumericTensorError> {
        self.set(row, Some(col), value)
    }

    pub fn set_vector_element(&mut self, col: usize, value: impl Into<TensorOperand>) -> Result<(), NumericTensorError> {
        let value = value.into();
        match self {
            NumericTensor::F64(x) => x.set_vector_element(col, value.assignment_value::<f64>()?),
            NumericTensor::F32(x) => x.set_vector_element(col, value.assignment_value::<f32>()?),
            NumericTensor::I32(x) => x.set_vector_element(col, value.assignment_value::<i32>()?),
        }
    }

    pub fn fill_row(&mut self, row: usize, value: impl Into<TensorOperand>) -> Result<(), NumericTensorError> {
        let value = value.into();
        match self {
            NumericTensor::F64(x) => x.fill_row(row, value.assignment_value::<f64>()?),
            NumericTensor::F32(x) => x.fill_row(row, value.assignment_value::<f32>()?),
            NumericTensor::I32(x) => x.fill_row(row, value.assignment_value::<i32>()?),
        }
    }

    /// `t[row, col] += value`.
    pub fn add_at(&mut self, row: usize, col: Option<usize>, value: impl Into<TensorOperand>) -> Result<(), NumericTensorError> {
        let updated = self.get(row, col)?.add(value)?;
        self.set(row, col, updated)
    }

    pub fn add(&self, rhs: impl Into<TensorOperand>) -> Result<Self, NumericTensorError> {
        let rhs = rhs.into();
        Ok(match self {
            NumericTensor::F64(x) => NumericTensor::F64(x.add(rhs.arithmetic_value::<f64>()?)?),
            NumericTensor::F32(x) => NumericTensor::F32(x.add(rhs.arithmetic_value::<f32>()?)?),
            NumericTensor::I32(x) => NumericTensor::I32(x.add(rhs.arithmetic_value::<i32>()?)?),
        })
    }

    pub fn div(&self, rhs: impl Into<TensorOperand>) -> Result<Self, NumericTensorError> {
        let rhs = rhs.into();
        Ok(match self {
            NumericTensor::F64(x) => NumericTensor::F64(x.div(rhs.arithmetic_value::<f64>()?)?),
            NumericTensor::F32(x) => NumericTensor::F32(x.div(rhs.arithmetic_value::<f32>()?)?),
            NumericTensor::I32(x) => NumericTensor::I32(x.div(rhs.arithmetic_value::<i32>()?)?),
        })
    }

    pub fn sum(&self) -> Self {
        match self {
            NumericTensor::F64(x) => NumericTensor::F64(x.sum()),
            NumericTensor::F32(x) => NumericTensor::F32(x.sum()),
            NumericTensor::I32(x) => NumericTensor::I32(x.sum()),
        }
    }

    pub fn item(&self) -> Result<NumericScalar, NumericTensorError> {
        Ok(match self {
            NumericTensor::F64(x) => x.item()?.into(),
            NumericTensor::F32(x) => x.item()?.into(),
            NumericTensor::I32(x) => x.item()?.into(),
        })
    }

    pub fn cast(&self, dtype: DType) -> Result<Self, NumericTensorError> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        Ok(match dtype.ensure_supported()? {
            DType::F64 => NumericTensor::F64(self.cast_typed()),
            DType::F32 => NumericTensor::F32(self.cast_typed()),
            DType::I32 => NumericTensor::I32(self.cast_typed()),
            _ => Err(DTypeError::UnsupportedKind(dtype))?,
        })
    }

    fn cast_typed<U: TensorElement>(&self) -> NumericTensorTyped<U> {
        match self {
            NumericTensor::F64(x) => x.cast(),
            NumericTensor::F32(x) => x.cast(),
            NumericTensor::I32(x) => x.cast(),
        }
    }

    pub fn to_f64(&self) -> Self {
        NumericTensor::F64(self.cast_typed())
    }

    pub fn to_f32(&self) -> Self {
        NumericTensor::F32(self.cast_typed())
    }

    pub fn to_i32(&self) -> Self {
        NumericTensor::I32(self.cast_typed())
    }
}

impl Display for NumericTensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericTensor::F64(x) => Display::fmt(x, f),
            NumericTensor::F32(x) => Display::fmt(x, f),
            NumericTensor::I32(x) => Display::fmt(x, f),
        }
    }
}
