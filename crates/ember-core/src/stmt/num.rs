use super::Value;
use crate::Error;

macro_rules! impl_num {
    (
        $(
            $variant:ident($ty:ty)
        )*
    ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::$variant(*value)
                }
            }
        )*
    };
}

impl_num! {
    I8(i8)
    I16(i16)
    I32(i32)
    I64(i64)
    U64(u64)
}

// Integer coercion accepts every integer variant and integer-valued strings.
// Range checks go through std's `try_into()`.
macro_rules! try_convert_range {
    ($value:expr, $val:expr, $target_ty:ty) => {
        $val.try_into()
            .map_err(|_| Error::type_conversion($value.clone(), stringify!($target_ty)))
    };
}

macro_rules! parse_string {
    ($value:expr, $s:expr, $target_ty:ty) => {
        $s.trim()
            .parse::<$target_ty>()
            .map_err(|_| Error::type_conversion($value.clone(), stringify!($target_ty)))
    };
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::I64(val) => Ok(val),
            Value::I8(val) => Ok(val.into()),
            Value::I16(val) => Ok(val.into()),
            Value::I32(val) => Ok(val.into()),
            Value::U64(val) => try_convert_range!(value, val, i64),
            Value::String(ref s) => parse_string!(value, s, i64),
            _ => Err(Error::type_conversion(value, "i64")),
        }
    }
}

impl TryFrom<Value> for usize {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::I8(val) => try_convert_range!(value, val, usize),
            Value::I16(val) => try_convert_range!(value, val, usize),
            Value::I32(val) => try_convert_range!(value, val, usize),
            Value::I64(val) => try_convert_range!(value, val, usize),
            Value::U64(val) => try_convert_range!(value, val, usize),
            Value::String(ref s) => parse_string!(value, s, usize),
            _ => Err(Error::type_conversion(value, "usize")),
        }
    }
}
