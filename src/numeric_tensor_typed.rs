use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use ndarray::{Array2, Axis};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use crate::dtype::DType;
use crate::numeric_scalar::{fmt_float, NumericScalarType};
use crate::numeric_tensor::{NumericTensor, NumericTensorError};

/// Element kinds a tensor can hold. Implemented once per supported kind by
/// `impl_tensor_element_float!` / `impl_tensor_element_int!`.
pub trait TensorElement: NumericScalarType + Zero + PartialEq + Debug + 'static {
    fn add_element(self, rhs: Self) -> Self;
    fn div_element(self, rhs: Self) -> Result<Self, NumericTensorError>;
    fn hash_element<H: Hasher>(&self, state: &mut H);
    fn fmt_element(&self, f: &mut Formatter<'_>) -> std::fmt::Result;
    fn into_dyn_tensor(tensor: NumericTensorTyped<Self>) -> NumericTensor;
    fn typed_ref(tensor: &NumericTensor) -> Result<&NumericTensorTyped<Self>, NumericTensorError>;
}

macro_rules! impl_tensor_element_float {
    ($a:ident, $b:ident) => {
        impl TensorElement for $a {
            fn add_element(self, rhs: Self) -> Self {
                self + rhs
            }

            fn div_element(self, rhs: Self) -> Result<Self, NumericTensorError> {
                Ok(self / rhs)
            }

            fn hash_element<H: Hasher>(&self, state: &mut H) {
                // 0.0 == -0.0, so both must hash alike.
                let v = if *self == 0.0 { 0.0 } else { *self };
                v.to_bits().hash(state)
            }

            fn fmt_element(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                fmt_float(self, f)
            }

            fn into_dyn_tensor(tensor: NumericTensorTyped<Self>) -> NumericTensor {
                NumericTensor::$b(tensor)
            }

            fn typed_ref(tensor: &NumericTensor) -> Result<&NumericTensorTyped<Self>, NumericTensorError> {
                if let NumericTensor::$b(x) = tensor {
                    Ok(x)
                } else {
                    Err(NumericTensorError::WrongDTypeError(DType::$b, tensor.dtype()))
                }
            }
        }
    };
}

macro_rules! impl_tensor_element_int {
    ($a:ident, $b:ident) => {
        impl TensorElement for $a {
            fn add_element(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            fn div_element(self, rhs: Self) -> Result<Self, NumericTensorError> {
                if rhs == 0 {
                    return Err(NumericTensorError::DivisionByZero);
                }
                Ok(self.wrapping_div(rhs))
            }

            fn hash_element<H: Hasher>(&self, state: &mut H) {
                self.hash(state)
            }

            fn fmt_element(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self)
            }

            fn into_dyn_tensor(tensor: NumericTensorTyped<Self>) -> NumericTensor {
                NumericTensor::$b(tensor)
            }

            fn typed_ref(tensor: &NumericTensor) -> Result<&NumericTensorTyped<Self>, NumericTensorError> {
                if let NumericTensor::$b(x) = tensor {
                    Ok(x)
                } else {
                    Err(NumericTensorError::WrongDTypeError(DType::$b, tensor.dtype()))
                }
            }
        }
    };
}

impl_tensor_element_float!(f64, F64);
impl_tensor_element_float!(f32, F32);
impl_tensor_element_int!(i32, I32);

/// Right-hand side of an assignment or arithmetic operation: a bare value, or a
/// tensor that must hold exactly one element.
#[derive(Debug, Clone)]
pub enum Operand<T> {
    Scalar(T),
    SingleCell(NumericTensorTyped<T>),
}

impl<T: TensorElement> Operand<T> {
    /// The single value this operand stands for, or the offending shape.
    fn single_value(self) -> Result<T, (usize, usize)> {
        match self {
            Operand::Scalar(x) => Ok(x),
            Operand::SingleCell(x) => {
                if x.shape() == (1, 1) {
                    Ok(x.data[[0, 0]])
                } else {
                    Err(x.shape())
                }
            }
        }
    }
}

impl<T: TensorElement> From<T> for Operand<T> {
    fn from(value: T) -> Self {
        Operand::Scalar(value)
    }
}

impl<T: TensorElement> From<NumericTensorTyped<T>> for Operand<T> {
    fn from(value: NumericTensorTyped<T>) -> Self {
        Operand::SingleCell(value)
    }
}

impl<T: TensorElement> From<&NumericTensorTyped<T>> for Operand<T> {
    fn from(value: &NumericTensorTyped<T>) -> Self {
        Operand::SingleCell(value.clone())
    }
}

/// Dense 2D tensor of a single element kind. Never empty, and never shares storage
/// with another tensor: every slice, extract, conversion or arithmetic result is a
/// fresh allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "TensorData<T>",
    bound(deserialize = "T: TensorElement + Deserialize<'de>")
)]
pub struct NumericTensorTyped<T> {
    data: Array2<T>,
}

/// Serialized form of [`NumericTensorTyped`], checked before it becomes a tensor.
#[derive(Deserialize)]
struct TensorData<T> {
    data: Array2<T>,
}

impl<T: TensorElement> TryFrom<TensorData<T>> for NumericTensorTyped<T> {
    type Error = NumericTensorError;
    fn try_from(value: TensorData<T>) -> Result<Self, Self::Error> {
        Self::from_array(value.data)
    }
}

impl<T: TensorElement> NumericTensorTyped<T> {
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, NumericTensorError> {
        check_not_empty(rows, cols)?;
        Ok(Self { data: Array2::zeros((rows, cols)) })
    }

    /// Copies rectangular row data. Every row must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, NumericTensorError> {
        let cols = rows.first().map(|x| x.as_ref().len()).unwrap_or(0);
        check_not_empty(rows.len(), cols)?;
        let mut flat = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(NumericTensorError::RaggedRows { row: i, len: row.len(), expected: cols });
            }
            flat.extend_from_slice(row);
        }
        Ok(Self { data: Array2::from_shape_vec((rows.len(), cols), flat)? })
    }

    pub fn from_array(data: Array2<T>) -> Result<Self, NumericTensorError> {
        check_not_empty(data.nrows(), data.ncols())?;
        Ok(Self { data })
    }

    /// 1×N row vector holding `values`.
    pub fn of(values: Vec<T>) -> Result<Self, NumericTensorError> {
        check_not_empty(1, values.len())?;
        let cols = values.len();
        Ok(Self { data: Array2::from_shape_vec((1, cols), values)? })
    }

    /// 1×N zero vector.
    pub fn vector(cols: usize) -> Result<Self, NumericTensorError> {
        Self::zeros(1, cols)
    }

    /// 1×N zero vector, handed to `init` before it is returned.
    pub fn vector_with<F>(cols: usize, init: F) -> Result<Self, NumericTensorError>
    where
        F: FnOnce(&mut Self) -> Result<(), NumericTensorError>,
    {
        let mut tensor = Self::vector(cols)?;
        init(&mut tensor)?;
        Ok(tensor)
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.outer_iter().map(|x| x.to_vec()).collect()
    }

    fn check_row(&self, row: usize) -> Result<(), NumericTensorError> {
        if row >= self.rows() {
            return Err(NumericTensorError::IndexOutOfBounds { axis: "row", index: row, len: self.rows() });
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<(), NumericTensorError> {
        if col >= self.cols() {
            return Err(NumericTensorError::IndexOutOfBounds { axis: "column", index: col, len: self.cols() });
        }
        Ok(())
    }

    pub fn value_at(&self, row: usize, col: usize) -> Result<T, NumericTensorError> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[[row, col]])
    }

    /// `get(row, None)` copies a whole row, `get(row, Some(col))` a single cell.
    pub fn get(&self, row: usize, col: Option<usize>) -> Result<Self, NumericTensorError> {
        match col {
            None => self.get_row(row),
            Some(col) => self.get_cell(row, col),
        }
    }

    pub fn get_row(&self, row: usize) -> Result<Self, NumericTensorError> {
        self.check_row(row)?;
        Ok(Self { data: self.data.select(Axis(0), &[row]) })
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<Self, NumericTensorError> {
        let value = self.value_at(row, col)?;
        Ok(Self { data: Array2::from_elem((1, 1), value) })
    }

    /// Indexed assignment.
    ///
    /// With a column this replaces one cell. Without one, a single-row tensor treats
    /// `row` as a column index into row 0, and any taller tensor has the whole row
    /// overwritten with `value`.
    pub fn set(&mut self, row: usize, col: Option<usize>, value: impl Into<Operand<T>>) -> Result<(), NumericTensorError> {
        match col {
            Some(col) => self.set_cell(row, col, value),
            None if self.rows() == 1 => self.set_vector_element(row, value),
            None => self.fill_row(row, value),
        }
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<Operand<T>>) -> Result<(), NumericTensorError> {
        let value = assignment_value(value.into())?;
        self.check_row(row)?;
        self.check_col(col)?;
        self.data[[row, col]] = value;
        Ok(())
    }

    pub fn set_vector_element(&mut self, col: usize, value: impl Into<Operand<T>>) -> Result<(), NumericTensorError> {
        if self.rows() != 1 {
            return Err(NumericTensorError::ShapeMismatch { expected: (1, self.cols()), actual: self.shape() });
        }
        self.set_cell(0, col, value)
    }

    pub fn fill_row(&mut self, row: usize, value: impl Into<Operand<T>>) -> Result<(), NumericTensorError> {
        let value = assignment_value(value.into())?;
        self.check_row(row)?;
        self.data.row_mut(row).fill(value);
        Ok(())
    }

    /// `t[row, col] += value`, spelled as a read followed by a [`set`](Self::set).
    pub fn add_at(&mut self, row: usize, col: Option<usize>, value: impl Into<Operand<T>>) -> Result<(), NumericTensorError> {
        let updated = self.get(row, col)?.add(value)?;
        self.set(row, col, updated)
    }

    pub fn add(&self, rhs: impl Into<Operand<T>>) -> Result<Self, NumericTensorError> {
        let rhs = rhs.into().single_value().map_err(NumericTensorError::InvalidOperand)?;
        Ok(Self { data: self.data.mapv(|x| x.add_element(rhs)) })
    }

    pub fn div(&self, rhs: impl Into<Operand<T>>) -> Result<Self, NumericTensorError> {
        let rhs = rhs.into().single_value().map_err(NumericTensorError::InvalidOperand)?;
        let mut out = Vec::with_capacity(self.data.len());
        for x in self.data.iter() {
            out.push(x.div_element(rhs)?);
        }
        Ok(Self { data: Array2::from_shape_vec(self.shape(), out)? })
    }

    /// Row-major sum of every element, as a 1×1 tensor.
    pub fn sum(&self) -> Self {
        let mut iter = self.data.iter().copied();
        // Constructors and deserialization both reject empty shapes.
        let first = iter.next().unwrap_or_else(T::zero);
        let total = iter.fold(first, |acc, x| acc.add_element(x));
        Self { data: Array2::from_elem((1, 1), total) }
    }

    pub fn item(&self) -> Result<T, NumericTensorError> {
        if self.shape() != (1, 1) {
            return Err(NumericTensorError::ShapeMismatch { expected: (1, 1), actual: self.shape() });
        }
        Ok(self.data[[0, 0]])
    }

    pub fn cast<U: TensorElement>(&self) -> NumericTensorTyped<U> {
        log::debug!("Casting {:?} tensor from {} to {}", self.shape(), T::DTYPE, U::DTYPE);
        NumericTensorTyped {
            data: self.data.mapv(|x| U::cast_from_numeric_scalar(&x.to_numeric_scalar())),
        }
    }

    pub fn to_f64(&self) -> NumericTensorTyped<f64> {
        self.cast()
    }

    pub fn to_f32(&self) -> NumericTensorTyped<f32> {
        self.cast()
    }

    pub fn to_i32(&self) -> NumericTensorTyped<i32> {
        self.cast()
    }

    pub fn to_dyn_type(&self) -> NumericTensor {
        T::into_dyn_tensor(self.clone())
    }

    fn fmt_row(&self, row: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.data.row(row).iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            x.fmt_element(f)?;
        }
        write!(f, "]")
    }
}

fn check_not_empty(rows: usize, cols: usize) -> Result<(), NumericTensorError> {
    if rows == 0 || cols == 0 {
        return Err(NumericTensorError::EmptyShape((rows, cols)));
    }
    Ok(())
}

fn assignment_value<T: TensorElement>(value: Operand<T>) -> Result<T, NumericTensorError> {
    value
        .single_value()
        .map_err(|shape| NumericTensorError::InvalidAssignment(format!("a tensor of shape {shape:?} to a single cell")))
}

impl<T: TensorElement> Hash for NumericTensorTyped<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        T::DTYPE.hash(state);
        self.shape().hash(state);
        for x in self.data.iter() {
            x.hash_element(state);
        }
    }
}

impl<T: TensorElement> Display for NumericTensorTyped<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tensor(")?;
        if self.rows() == 1 {
            self.fmt_row(0, f)?;
        } else {
            write!(f, "[")?;
            for row in 0..self.rows() {
                if row > 0 {
                    write!(f, ",\n")?;
                }
                self.fmt_row(row, f)?;
            }
            write!(f, "]")?;
        }
        write!(f, ")")
    }
}

impl<T: TensorElement> From<NumericTensorTyped<T>> for NumericTensor {
    fn from(value: NumericTensorTyped<T>) -> Self {
        T::into_dyn_tensor(value)
    }
}

impl<T: TensorElement> TryFrom<&NumericTensor> for NumericTensorTyped<T> {
    type Error = NumericTensorError;
    fn try_from(value: &NumericTensor) -> Result<Self, Self::Error> {
        Ok(T::typed_ref(value)?.clone())
    }
}
