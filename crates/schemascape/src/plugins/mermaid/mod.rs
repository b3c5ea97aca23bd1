//! Mermaid ER diagram plugin
//!
//! Syntax examples:
//! ```text
//! erDiagram
//!     CUSTOMER ||--o{ ORDER : places
//!     CUSTOMER {
//!         int id PK
//!         string email UK
//!     }
//!     ORDER {
//!         int id PK
//!         int customer_id FK
//!     }
//! ```
//!
//! Relationship tokens: `||` exactly one, `|o` / `o|` zero or one,
//! `}|` / `|{` one or more, `}o` / `o{` zero or more. `--` and `..` links
//! are treated alike. Word forms such as `only one to zero or more` are
//! accepted and mean the same as their glyphs.

mod detector;
mod parser;
mod serializer;
mod syntax;

pub use detector::MermaidDetector;
pub use parser::{decode_operator, participation, MermaidParser};
pub use serializer::to_mermaid;
