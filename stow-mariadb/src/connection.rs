use crate::{statement::MariaDbStatement, MariaDbConfig};
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};
use std::cell::RefCell;
use std::rc::Rc;
use stow_core::{Connection, DBValue, Error, Result};

pub struct MariaDbConnection {
    conn: Rc<RefCell<Conn>>,
    connected: bool,
}

impl MariaDbConnection {
    pub fn open(config: &MariaDbConfig) -> Result<Self> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.clone()))
            .tcp_port(config.port)
            .user(Some(config.username.clone()))
            .pass(Some(config.password.clone()))
            .db_name(config.database.clone());
        let conn = Conn::new(opts).map_err(|e| Error::Connection(e.to_string()))?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
            connected: true,
        })
    }
}

impl Connection for MariaDbConnection {
    type Statement = MariaDbStatement;

    fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn auto_commit(&self) -> Result<bool> {
        let value: i64 = self
            .conn
            .borrow_mut()
            .query_first("SELECT @@autocommit")
            .map_err(|e| Error::Execute(e.to_string()))?
            .ok_or_else(|| Error::Execute("server returned no autocommit value".to_string()))?;
        Ok(value != 0)
    }

    fn set_auto_commit(&mut self, enabled: bool) -> Result<()> {
        let sql = format!("SET autocommit={}", if enabled { 1 } else { 0 });
        self.conn
            .borrow_mut()
            .query_drop(sql)
            .map_err(|e| Error::Execute(e.to_string()).into())
    }

    fn transaction_start(&mut self) -> Result<()> {
        self.conn
            .borrow_mut()
            .query_drop("START TRANSACTION")
            .map_err(|e| Error::Execute(e.to_string()).into())
    }

    fn transaction_commit(&mut self) -> Result<()> {
        self.conn
            .borrow_mut()
            .query_drop("COMMIT")
            .map_err(|e| Error::Execute(e.to_string()).into())
    }

    fn transaction_rollback(&mut self) -> Result<()> {
        self.conn
            .borrow_mut()
            .query_drop("ROLLBACK")
            .map_err(|e| Error::Execute(e.to_string()).into())
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.conn
            .borrow_mut()
            .query_drop(sql)
            .map_err(|e| Error::Execute(e.to_string()).into())
    }

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement> {
        let stmt = self
            .conn
            .borrow_mut()
            .prep(sql)
            .map_err(|e| Error::Prepare(e.to_string()))?;
        Ok(MariaDbStatement::new(Rc::clone(&self.conn), stmt))
    }

    fn last_insert_id(&self) -> Result<DBValue> {
        Ok(DBValue::U64(self.conn.borrow().last_insert_id().unwrap_or(0)))
    }
}
