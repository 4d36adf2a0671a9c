mod backend;
mod postgres;
mod sqlite;

pub use backend::{
  BrandRecord, CategoryRecord, OrderRecord, OtpPurpose, ProductFilter, ProductRecord, Session,
  StoreBackend, StoreUser,
};
pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;
