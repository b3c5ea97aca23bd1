//! SQL DDL plugin
//!
//! Parses `CREATE TABLE` / `CREATE VIEW` DDL and writes it back out.
//!
//! Syntax examples:
//! ```text
//! CREATE TABLE users (
//!     id SERIAL PRIMARY KEY,
//!     email VARCHAR(255) NOT NULL UNIQUE
//! );
//!
//! CREATE TABLE orders (
//!     id SERIAL PRIMARY KEY,
//!     user_id INT NOT NULL REFERENCES users(id)
//! );
//!
//! CREATE VIEW order_emails AS
//! SELECT o.id, u.email FROM orders o JOIN users u ON u.id = o.user_id;
//! ```

mod cursor;
mod detector;
mod lexer;
mod parser;
mod serializer;
mod view;

pub use detector::SqlDetector;
pub use lexer::{tokenize, Token};
pub use parser::SqlParser;
pub use serializer::{quote_identifier, to_sql};
