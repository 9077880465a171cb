use crate::Error;
use std::fmt;
use time::{
    format_description::well_known::Iso8601, Date, PrimitiveDateTime, Time as TimeOfDayValue,
};

/// A single SQL-relevant scalar, or `Null`.
///
/// Exactly one variant is ever active; `Null` is a distinct tag rather than a
/// sentinel carried inside another variant (unlike the teacher's `Value`,
/// which folds nullability into each variant's `Option`).
#[derive(Debug, Clone)]
pub enum DBValue {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F64(f64),
    Blob(Vec<u8>),
    Text(String),
    Date(Date),
    TimeOfDay(TimeOfDayValue),
    DateTime(PrimitiveDateTime),
}

impl PartialEq for DBValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::I8(l), Self::I8(r)) => l == r,
            (Self::I16(l), Self::I16(r)) => l == r,
            (Self::I32(l), Self::I32(r)) => l == r,
            (Self::I64(l), Self::I64(r)) => l == r,
            (Self::U8(l), Self::U8(r)) => l == r,
            (Self::U16(l), Self::U16(r)) => l == r,
            (Self::U32(l), Self::U32(r)) => l == r,
            (Self::U64(l), Self::U64(r)) => l == r,
            (Self::F64(l), Self::F64(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Text(l), Self::Text(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::TimeOfDay(l), Self::TimeOfDay(r)) => l == r,
            (Self::DateTime(l), Self::DateTime(r)) => l == r,
            _ => false,
        }
    }
}

impl fmt::Display for DBValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Blob(v) => write!(f, "Blob({} bytes)", v.len()),
            Self::Text(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::TimeOfDay(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from {
    ($source:ty, $variant:ident) => {
        impl From<$source> for DBValue {
            fn from(value: $source) -> Self {
                DBValue::$variant(value)
            }
        }
    };
}
impl_from!(bool, Bool);
impl_from!(i8, I8);
impl_from!(i16, I16);
impl_from!(i32, I32);
impl_from!(i64, I64);
impl_from!(u8, U8);
impl_from!(u16, U16);
impl_from!(u32, U32);
impl_from!(u64, U64);
impl_from!(f64, F64);
impl_from!(Vec<u8>, Blob);
impl_from!(String, Text);
impl_from!(Date, Date);
impl_from!(TimeOfDayValue, TimeOfDay);
impl_from!(PrimitiveDateTime, DateTime);

impl From<&str> for DBValue {
    fn from(value: &str) -> Self {
        DBValue::Text(value.to_string())
    }
}

impl<T: Into<DBValue>> From<Option<T>> for DBValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DBValue::Null,
        }
    }
}

impl DBValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    pub fn is_i8(&self) -> bool {
        matches!(self, Self::I8(..))
    }

    pub fn is_i16(&self) -> bool {
        matches!(self, Self::I16(..))
    }

    pub fn is_i32(&self) -> bool {
        matches!(self, Self::I32(..))
    }

    pub fn is_i64(&self) -> bool {
        matches!(self, Self::I64(..))
    }

    pub fn is_u8(&self) -> bool {
        matches!(self, Self::U8(..))
    }

    pub fn is_u16(&self) -> bool {
        matches!(self, Self::U16(..))
    }

    pub fn is_u32(&self) -> bool {
        matches!(self, Self::U32(..))
    }

    pub fn is_u64(&self) -> bool {
        matches!(self, Self::U64(..))
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Self::F64(..))
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob(..))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(..))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(..))
    }

    pub fn is_time_of_day(&self) -> bool {
        matches!(self, Self::TimeOfDay(..))
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::DateTime(..))
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(..) => "bool",
            Self::I8(..) => "i8",
            Self::I16(..) => "i16",
            Self::I32(..) => "i32",
            Self::I64(..) => "i64",
            Self::U8(..) => "u8",
            Self::U16(..) => "u16",
            Self::U32(..) => "u32",
            Self::U64(..) => "u64",
            Self::F64(..) => "f64",
            Self::Blob(..) => "blob",
            Self::Text(..) => "text",
            Self::Date(..) => "date",
            Self::TimeOfDay(..) => "time",
            Self::DateTime(..) => "datetime",
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.type_name().to_string(),
        }
    }

    /// Strict extraction: fails unless the tag matches exactly.
    pub fn get_i64(&self) -> crate::Result<i64> {
        match self {
            Self::I64(v) => Ok(*v),
            _ => Err(self.mismatch("i64").into()),
        }
    }

    pub fn get_bool(&self) -> crate::Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => Err(self.mismatch("bool").into()),
        }
    }

    pub fn get_text(&self) -> crate::Result<&str> {
        match self {
            Self::Text(v) => Ok(v.as_str()),
            _ => Err(self.mismatch("text").into()),
        }
    }

    pub fn get_blob(&self) -> crate::Result<&[u8]> {
        match self {
            Self::Blob(v) => Ok(v.as_slice()),
            _ => Err(self.mismatch("blob").into()),
        }
    }

    pub fn get_f64(&self) -> crate::Result<f64> {
        match self {
            Self::F64(v) => Ok(*v),
            _ => Err(self.mismatch("f64").into()),
        }
    }

    /// Coerced extraction to an `i64`: numeric widening across integer
    /// variants and `bool`, as documented in the coercion matrix.
    pub fn get_as_i64(&self) -> crate::Result<i64> {
        match self {
            Self::Bool(v) => Ok(*v as i64),
            Self::I8(v) => Ok(*v as i64),
            Self::I16(v) => Ok(*v as i64),
            Self::I32(v) => Ok(*v as i64),
            Self::I64(v) => Ok(*v),
            Self::U8(v) => Ok(*v as i64),
            Self::U16(v) => Ok(*v as i64),
            Self::U32(v) => Ok(*v as i64),
            Self::U64(v) => i64::try_from(*v).map_err(|_| self.mismatch("i64").into()),
            _ => Err(self.mismatch("i64").into()),
        }
    }

    pub fn get_as_u64(&self) -> crate::Result<u64> {
        match self {
            Self::Bool(v) => Ok(*v as u64),
            Self::I8(v) => u64::try_from(*v).map_err(|_| self.mismatch("u64").into()),
            Self::I16(v) => u64::try_from(*v).map_err(|_| self.mismatch("u64").into()),
            Self::I32(v) => u64::try_from(*v).map_err(|_| self.mismatch("u64").into()),
            Self::I64(v) => u64::try_from(*v).map_err(|_| self.mismatch("u64").into()),
            Self::U8(v) => Ok(*v as u64),
            Self::U16(v) => Ok(*v as u64),
            Self::U32(v) => Ok(*v as u64),
            Self::U64(v) => Ok(*v),
            _ => Err(self.mismatch("u64").into()),
        }
    }

    pub fn get_as_f64(&self) -> crate::Result<f64> {
        match self {
            Self::F64(v) => Ok(*v),
            Self::I8(v) => Ok(*v as f64),
            Self::I16(v) => Ok(*v as f64),
            Self::I32(v) => Ok(*v as f64),
            Self::I64(v) => Ok(*v as f64),
            Self::U8(v) => Ok(*v as f64),
            Self::U16(v) => Ok(*v as f64),
            Self::U32(v) => Ok(*v as f64),
            Self::U64(v) => Ok(*v as f64),
            _ => Err(self.mismatch("f64").into()),
        }
    }

    /// Coerced extraction to text: numeric-to-text, date/time-to-ISO string,
    /// and blob-as-UTF8 are all allowed by the documented matrix.
    pub fn get_as_text(&self) -> crate::Result<String> {
        match self {
            Self::Text(v) => Ok(v.clone()),
            Self::Bool(v) => Ok(v.to_string()),
            Self::I8(v) => Ok(v.to_string()),
            Self::I16(v) => Ok(v.to_string()),
            Self::I32(v) => Ok(v.to_string()),
            Self::I64(v) => Ok(v.to_string()),
            Self::U8(v) => Ok(v.to_string()),
            Self::U16(v) => Ok(v.to_string()),
            Self::U32(v) => Ok(v.to_string()),
            Self::U64(v) => Ok(v.to_string()),
            Self::F64(v) => Ok(v.to_string()),
            Self::Date(v) => v
                .format(&Iso8601::DATE)
                .map_err(|e| Error::TypeMismatch {
                    expected: "text",
                    found: e.to_string(),
                }.into()),
            Self::TimeOfDay(v) => v
                .format(&Iso8601::TIME)
                .map_err(|e| Error::TypeMismatch {
                    expected: "text",
                    found: e.to_string(),
                }.into()),
            Self::DateTime(v) => v
                .format(&Iso8601::DATE_TIME)
                .map_err(|e| Error::TypeMismatch {
                    expected: "text",
                    found: e.to_string(),
                }.into()),
            Self::Blob(v) => String::from_utf8(v.clone()).map_err(|_| self.mismatch("text").into()),
            Self::Null => Err(self.mismatch("text").into()),
        }
    }

    /// Coerced extraction of a `Date`, parsing an ISO-extended string when
    /// the value is stored as text (the shape every driver round-trips
    /// dates through).
    pub fn get_as_date(&self) -> crate::Result<Date> {
        match self {
            Self::Date(v) => Ok(*v),
            Self::Text(v) => Date::parse(v, &Iso8601::DATE).map_err(|_| self.mismatch("date").into()),
            _ => Err(self.mismatch("date").into()),
        }
    }

    pub fn get_as_time(&self) -> crate::Result<TimeOfDayValue> {
        match self {
            Self::TimeOfDay(v) => Ok(*v),
            Self::Text(v) => {
                TimeOfDayValue::parse(v, &Iso8601::TIME).map_err(|_| self.mismatch("time").into())
            }
            _ => Err(self.mismatch("time").into()),
        }
    }

    pub fn get_as_datetime(&self) -> crate::Result<PrimitiveDateTime> {
        match self {
            Self::DateTime(v) => Ok(*v),
            Self::Text(v) => PrimitiveDateTime::parse(v, &Iso8601::DATE_TIME)
                .map_err(|_| self.mismatch("datetime").into()),
            _ => Err(self.mismatch("datetime").into()),
        }
    }
}

/// An ordered sequence of `DBValue`s produced by a statement step. Never
/// retains pointers into driver-internal buffers: every cell is an owned
/// copy by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(pub Vec<DBValue>);

impl Row {
    pub fn new(values: Vec<DBValue>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DBValue> {
        self.0.get(index)
    }
}

impl std::ops::Index<usize> for Row {
    type Output = DBValue;

    fn index(&self, index: usize) -> &DBValue {
        &self.0[index]
    }
}

impl IntoIterator for Row {
    type Item = DBValue;
    type IntoIter = std::vec::IntoIter<DBValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_get_rejects_mismatched_tag() {
        let v = DBValue::I64(42);
        assert!(v.get_text().is_err());
        assert_eq!(v.get_i64().unwrap(), 42);
    }

    #[test]
    fn coerced_get_widens_across_integer_variants_and_bool() {
        assert_eq!(DBValue::Bool(true).get_as_i64().unwrap(), 1);
        assert_eq!(DBValue::U8(200).get_as_i64().unwrap(), 200);
        assert!(DBValue::I32(-5).get_as_u64().is_err());
    }

    #[test]
    fn coerced_get_rejects_outside_the_documented_matrix() {
        assert!(DBValue::Blob(vec![0xff]).get_as_i64().is_err());
    }

    #[test]
    fn blob_as_text_interprets_utf8() {
        let v = DBValue::Blob(b"hello".to_vec());
        assert_eq!(v.get_as_text().unwrap(), "hello");
    }

    #[test]
    fn null_is_a_distinct_tag() {
        assert!(DBValue::Null.is_null());
        assert_ne!(DBValue::Null, DBValue::I64(0));
    }

    #[test]
    fn row_indexes_by_position() {
        let row = Row::new(vec![DBValue::I64(1), DBValue::Text("a".to_string())]);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0], DBValue::I64(1));
    }
}
