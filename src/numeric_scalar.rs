use std::fmt::{Debug, Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::dtype::{DType, DTypeError, DTypeOfPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NumericScalar {
    F64(f64),
    F32(f32),
    I32(i32),
}

impl NumericScalar {
    pub fn dtype(&self) -> DType {
        match self {
            NumericScalar::F64(_) => DType::F64,
            NumericScalar::F32(_) => DType::F32,
            NumericScalar::I32(_) => DType::I32,
        }
    }

    pub fn zero_of(dtype: DType) -> Result<Self, DTypeError> {
        Ok(match dtype {
            DType::F64 => NumericScalar::F64(0.0),
            DType::F32 => NumericScalar::F32(0.0),
            DType::I32 => NumericScalar::I32(0),
            _ => Err(DTypeError::UnsupportedKind(dtype))?,
        })
    }

    pub fn is_zero(&self) -> bool {
        match self {
            NumericScalar::F64(x) => *x == 0.0,
            NumericScalar::F32(x) => *x == 0.0,
            NumericScalar::I32(x) => *x == 0,
        }
    }

    /// Converts to `dtype` the way arithmetic operands are coerced.
    ///
    /// Floats headed for `I32` are truncated toward zero. Magnitudes outside the
    /// `i32` range saturate to `i32::MIN`/`i32::MAX` and NaN becomes 0.
    pub fn cast(&self, dtype: DType) -> Result<Self, DTypeError> {
        Ok(match dtype {
            DType::F64 => NumericScalar::F64(f64::cast_from_numeric_scalar(self)),
            DType::F32 => NumericScalar::F32(f32::cast_from_numeric_scalar(self)),
            DType::I32 => NumericScalar::I32(i32::cast_from_numeric_scalar(self)),
            _ => Err(DTypeError::UnsupportedKind(dtype))?,
        })
    }

    /// Coercion allowed when assigning into a tensor of kind `dtype`: the same kind,
    /// or a widening from `I32` or `F32`. Narrowing returns `None`.
    pub fn coerce_for_assignment(&self, dtype: DType) -> Option<Self> {
        match (self, dtype) {
            (NumericScalar::F64(_), DType::F64)
            | (NumericScalar::F32(_), DType::F32)
            | (NumericScalar::I32(_), DType::I32) => Some(*self),
            (NumericScalar::F32(x), DType::F64) => Some(NumericScalar::F64(*x as f64)),
            (NumericScalar::I32(x), DType::F64) => Some(NumericScalar::F64(*x as f64)),
            (NumericScalar::I32(x), DType::F32) => Some(NumericScalar::F32(*x as f32)),
            _ => None,
        }
    }
}

impl Display for NumericScalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericScalar::F64(x) => fmt_float(x, f),
            NumericScalar::F32(x) => fmt_float(x, f),
            NumericScalar::I32(x) => write!(f, "{x}"),
        }
    }
}

/// Writes a float so that its mantissa always carries a decimal point: `3.0`,
/// `1.0e20`, `1.5e-7`. Infinities and NaN are written as-is.
pub(crate) fn fmt_float<F: Debug>(value: &F, f: &mut Formatter<'_>) -> std::fmt::Result {
    let text = format!("{value:?}");
    if text.contains(['.', 'i', 'N']) {
        return f.write_str(&text);
    }
    match text.find('e') {
        Some(exp) => write!(f, "{}.0{}", &text[..exp], &text[exp..]),
        None => write!(f, "{text}.0"),
    }
}

pub trait NumericScalarType: DTypeOfPrimitive + Copy {
    fn to_numeric_scalar(self) -> NumericScalar;
    fn cast_from_numeric_scalar(value: &NumericScalar) -> Self;
}

impl NumericScalarType for f64 {
    fn to_numeric_scalar(self) -> NumericScalar {
        NumericScalar::F64(self)
    }
    fn cast_from_numeric_scalar(value: &NumericScalar) -> Self {
        match value {
            NumericScalar::F64(v) => *v,
            NumericScalar::F32(v) => *v as f64,
            NumericScalar::I32(v) => *v as f64,
        }
    }
}

impl NumericScalarType for f32 {
    fn to_numeric_scalar(self) -> NumericScalar {
        NumericScalar::F32(self)
    }
    fn cast_from_numeric_scalar(value: &NumericScalar) -> Self {
        match value {
            NumericScalar::F64(v) => *v as f32,
            NumericScalar::F32(v) => *v,
            NumericScalar::I32(v) => *v as f32,
        }
    }
}

impl NumericScalarType for i32 {
    fn to_numeric_scalar(self) -> NumericScalar {
        NumericScalar::I32(self)
    }
    fn cast_from_numeric_scalar(value: &NumericScalar) -> Self {
        match value {
            NumericScalar::F64(v) => saturating_f64_to_i32(*v),
            NumericScalar::F32(v) => saturating_f64_to_i32(*v as f64),
            NumericScalar::I32(v) => *v,
        }
    }
}

fn saturating_f64_to_i32(v: f64) -> i32 {
    if v.is_nan() || v.trunc() < i32::MIN as f64 || v.trunc() > i32::MAX as f64 {
        log::trace!("saturating {v} while converting to Int32");
    }
    // `as` truncates toward zero and saturates out-of-range values.
    v as i32
}

impl<T: NumericScalarType> From<T> for NumericScalar {
    fn from(value: T) -> Self {
        value.to_numeric_scalar()
    }
}

impl From<NumericScalar> for f64 {
    fn from(value: NumericScalar) -> Self {
        Self::cast_from_numeric_scalar(&value)
    }
}

impl From<NumericScalar> for f32 {
    fn from(value: NumericScalar) -> Self {
        Self::cast_from_numeric_scalar(&value)
    }
}

impl From<NumericScalar> for i32 {
    fn from(value: NumericScalar) -> Self {
        Self::cast_from_numeric_scalar(&value)
    }
}
