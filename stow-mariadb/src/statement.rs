use crate::value_wrap::ValueWrap;
use mysql::prelude::Queryable;
use mysql::{Conn, Params, Statement as MyStatement, Value as MyValue};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use stow_core::{DBValue, Error, Result, Row, Statement};

/// A MariaDB statement. The sync `mysql` crate has no incremental native
/// bind-by-index, so bound values are buffered here and submitted together
/// as positional parameters when `execute` runs; the full result set is
/// materialised eagerly into owned rows at the same time. `stmt` is the
/// server-side prepared statement obtained at `prepare` time, so malformed
/// SQL surfaces immediately rather than only once `execute` is called.
pub struct MariaDbStatement {
    conn: Rc<RefCell<Conn>>,
    stmt: MyStatement,
    params: Vec<MyValue>,
    rows: VecDeque<Row>,
}

impl MariaDbStatement {
    pub(crate) fn new(conn: Rc<RefCell<Conn>>, stmt: MyStatement) -> Self {
        Self {
            conn,
            stmt,
            params: Vec::new(),
            rows: VecDeque::new(),
        }
    }

    fn set(&mut self, index: usize, value: MyValue) {
        if index >= self.params.len() {
            self.params.resize(index + 1, MyValue::NULL);
        }
        self.params[index] = value;
    }
}

impl Statement for MariaDbStatement {
    fn bind_null(&mut self, index: usize) -> Result<()> {
        self.set(index, MyValue::NULL);
        Ok(())
    }

    fn bind_bool(&mut self, index: usize, value: bool) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::Bool(value)).into());
        Ok(())
    }

    fn bind_i8(&mut self, index: usize, value: i8) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::I8(value)).into());
        Ok(())
    }

    fn bind_i16(&mut self, index: usize, value: i16) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::I16(value)).into());
        Ok(())
    }

    fn bind_i32(&mut self, index: usize, value: i32) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::I32(value)).into());
        Ok(())
    }

    fn bind_i64(&mut self, index: usize, value: i64) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::I64(value)).into());
        Ok(())
    }

    fn bind_u8(&mut self, index: usize, value: u8) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::U8(value)).into());
        Ok(())
    }

    fn bind_u16(&mut self, index: usize, value: u16) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::U16(value)).into());
        Ok(())
    }

    fn bind_u32(&mut self, index: usize, value: u32) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::U32(value)).into());
        Ok(())
    }

    fn bind_u64(&mut self, index: usize, value: u64) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::U64(value)).into());
        Ok(())
    }

    fn bind_f64(&mut self, index: usize, value: f64) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::F64(value)).into());
        Ok(())
    }

    fn bind_text(&mut self, index: usize, value: &str) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::Text(value.to_string())).into());
        Ok(())
    }

    fn bind_blob(&mut self, index: usize, value: &[u8]) -> Result<()> {
        self.set(index, ValueWrap::from(DBValue::Blob(value.to_vec())).into());
        Ok(())
    }

    fn execute(&mut self) -> Result<()> {
        self.rows.clear();
        let params = if self.params.is_empty() {
            Params::Empty
        } else {
            Params::Positional(self.params.clone())
        };
        let mut conn = self.conn.borrow_mut();
        let mut result = conn
            .exec_iter(&self.stmt, params)
            .map_err(|e| Error::Execute(e.to_string()))?;
        // A statement with no result set (INSERT/UPDATE/DELETE/DDL) yields
        // an empty row sequence rather than an error.
        if let Some(set) = result.iter() {
            for row in set {
                let row = row.map_err(|e| Error::Execute(e.to_string()))?;
                let column_count = row.len();
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    let raw = row.as_ref(i).cloned().unwrap_or(MyValue::NULL);
                    values.push(DBValue::from(ValueWrap::try_from(raw)?));
                }
                self.rows.push_back(Row::new(values));
            }
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn front(&self) -> Result<Row> {
        self.rows
            .front()
            .cloned()
            .ok_or_else(|| Error::Execute("front() called on an empty statement".to_string()).into())
    }

    fn pop_front(&mut self) -> Result<()> {
        if self.rows.pop_front().is_none() {
            return Err(Error::Execute("pop_front() called on an empty statement".to_string()).into());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.params.clear();
        self.rows.clear();
        Ok(())
    }
}
