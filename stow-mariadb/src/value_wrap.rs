use mysql::Value as MyValue;
use stow_core::{DBValue, Error, Result};
use time::{Date, Month, PrimitiveDateTime, Time};

pub(crate) struct ValueWrap(pub(crate) DBValue);

impl From<DBValue> for ValueWrap {
    fn from(value: DBValue) -> Self {
        Self(value)
    }
}

impl From<ValueWrap> for DBValue {
    fn from(value: ValueWrap) -> Self {
        value.0
    }
}

fn month_from_number(month: u8) -> Result<Month> {
    Ok(match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        other => return Err(Error::Execute(format!("invalid month {other}")).into()),
    })
}

impl TryFrom<MyValue> for ValueWrap {
    type Error = anyhow::Error;

    fn try_from(value: MyValue) -> Result<Self> {
        Ok(match value {
            MyValue::NULL => DBValue::Null,
            MyValue::Bytes(bytes) => match String::from_utf8(bytes.clone()) {
                Ok(text) => DBValue::Text(text),
                Err(_) => DBValue::Blob(bytes),
            },
            MyValue::Int(v) => DBValue::I64(v),
            MyValue::UInt(v) => DBValue::U64(v),
            MyValue::Float(v) => DBValue::F64(v as f64),
            MyValue::Double(v) => DBValue::F64(v),
            MyValue::Date(year, month, day, hour, minute, second, micros) => {
                let date = Date::from_calendar_date(year as i32, month_from_number(month)?, day)
                    .map_err(|e| Error::Execute(e.to_string()))?;
                let time = Time::from_hms_micro(hour, minute, second, micros)
                    .map_err(|e| Error::Execute(e.to_string()))?;
                DBValue::DateTime(PrimitiveDateTime::new(date, time))
            }
            MyValue::Time(negative, _days, hours, minutes, seconds, micros) => {
                if negative {
                    return Err(Error::TypeMismatch {
                        expected: "time",
                        found: "negative MySQL TIME interval".to_string(),
                    }
                    .into());
                }
                DBValue::TimeOfDay(
                    Time::from_hms_micro(hours, minutes, seconds, micros)
                        .map_err(|e| Error::Execute(e.to_string()))?,
                )
            }
        }
        .into())
    }
}

impl From<ValueWrap> for MyValue {
    fn from(value: ValueWrap) -> Self {
        match value.0 {
            DBValue::Null => MyValue::NULL,
            DBValue::Bool(v) => MyValue::Int(v as i64),
            DBValue::I8(v) => MyValue::Int(v as i64),
            DBValue::I16(v) => MyValue::Int(v as i64),
            DBValue::I32(v) => MyValue::Int(v as i64),
            DBValue::I64(v) => MyValue::Int(v),
            DBValue::U8(v) => MyValue::UInt(v as u64),
            DBValue::U16(v) => MyValue::UInt(v as u64),
            DBValue::U32(v) => MyValue::UInt(v as u64),
            DBValue::U64(v) => MyValue::UInt(v),
            DBValue::F64(v) => MyValue::Double(v),
            DBValue::Blob(v) => MyValue::Bytes(v),
            DBValue::Text(v) => MyValue::Bytes(v.into_bytes()),
            DBValue::Date(v) => MyValue::Bytes(v.to_string().into_bytes()),
            DBValue::TimeOfDay(v) => MyValue::Bytes(v.to_string().into_bytes()),
            DBValue::DateTime(v) => MyValue::Bytes(v.to_string().into_bytes()),
        }
    }
}
