//! Schema-less row storage with typed binding.
//!
//! Rows are appended to a [`RecordList`] as key/value [`Fields`], usually by
//! [`load_rows`] over a [`RowCursor`], and bound on demand into structs
//! declared with [`bindable!`]:
//!
//! ```
//! use rowbind::{bindable, collect_all, load_rows, MemoryRows, RecordList, Value};
//!
//! bindable! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         #[db = "user_id"]
//!         pub id: i32,
//!         pub name: String,
//!     }
//! }
//!
//! let mut rows = MemoryRows::new(["user_id", "NAME"])
//!     .with_row([Value::Int(42), Value::Bytes(b"Alice".to_vec())]);
//! let mut list = RecordList::new();
//! load_rows(&mut list, &mut rows)?;
//!
//! let users: Vec<User> = collect_all(&mut list)?;
//! assert_eq!(users[0].id, 42);
//! assert_eq!(users[0].name, "Alice");
//! # Ok::<(), rowbind::MapError>(())
//! ```

pub mod bind;
pub mod cli;
pub mod coerce;
pub mod csv_rows;
pub mod error;
pub mod list;
pub mod materialize;
pub mod preview;
pub mod record;
pub mod rows;
pub mod shape;
pub mod table;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

pub use crate::{
    bind::bind,
    coerce::FromValue,
    csv_rows::CsvRows,
    error::{ConversionError, MapError},
    list::RecordList,
    materialize::{collect_all, load_rows, materialize_all},
    record::{Fields, Record},
    rows::{MemoryRows, RowCursor, flatten_row},
    shape::{Bindable, FieldSpec, Shape},
    value::Value,
};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("rowbind", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview::execute(&args),
        Commands::Dump(args) => preview::dump(&args),
    }
}
