use half::{bf16, f16};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(Debug, thiserror::Error)]
pub enum DTypeError {
    #[error("Unsupported kind: {0}")]
    UnsupportedKind(DType),
}

/// Numeric kind tag. Only [`DType::F64`], [`DType::F32`] and [`DType::I32`] can back a
/// tensor; the remaining kinds exist so that callers asking for them get a proper
/// `UnsupportedKind` error instead of a compile failure deep in generic code.
#[derive(
    Copy, Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum DType {
    F64,
    F32,
    BF16,
    F16,
    I64,
    I32,
    U8,
    BOOL,
}

impl DType {
    pub fn is_supported(&self) -> bool {
        matches!(self, DType::F64 | DType::F32 | DType::I32)
    }

    pub fn ensure_supported(self) -> Result<Self, DTypeError> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(DTypeError::UnsupportedKind(self))
        }
    }

    /// All kinds a tensor can be built from, in declaration order.
    pub fn supported() -> impl Iterator<Item = DType> {
        DType::iter().filter(|x| x.is_supported())
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::F64 => write!(f, "Float64"),
            DType::F32 => write!(f, "Float32"),
            DType::BF16 => write!(f, "BFloat16"),
            DType::F16 => write!(f, "Float16"),
            DType::I64 => write!(f, "Int64"),
            DType::I32 => write!(f, "Int32"),
            DType::U8 => write!(f, "UInt8"),
            DType::BOOL => write!(f, "Bool"),
        }
    }
}

pub trait DTypeOfPrimitive {
    const DTYPE: DType;
}

impl DTypeOfPrimitive for f64 { const DTYPE: DType = DType::F64; }
impl DTypeOfPrimitive for f32 { const DTYPE: DType = DType::F32; }
impl DTypeOfPrimitive for bf16 { const DTYPE: DType = DType::BF16; }
impl DTypeOfPrimitive for f16 { const DTYPE: DType = DType::F16; }
impl DTypeOfPrimitive for i64 { const DTYPE: DType = DType::I64; }
impl DTypeOfPrimitive for i32 { const DTYPE: DType = DType::I32; }
impl DTypeOfPrimitive for u8 { const DTYPE: DType = DType::U8; }
impl DTypeOfPrimitive for bool { const DTYPE: DType = DType::BOOL; }
