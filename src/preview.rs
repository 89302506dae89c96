//! Commands of the inspection binary.
//!
//! Both commands load the whole input through [`CsvRows`] and
//! [`load_rows`](crate::materialize::load_rows) before printing, so they
//! exercise the same path a library caller takes.

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{DumpArgs, PreviewArgs},
    csv_rows::CsvRows,
    list::RecordList,
    materialize::load_rows,
    rows::RowCursor,
    table,
};

fn load_csv(
    input: &std::path::Path,
    delimiter: Option<u8>,
) -> Result<(Vec<String>, RecordList)> {
    let mut rows = CsvRows::from_path(input, delimiter)
        .with_context(|| format!("Opening input file {input:?}"))?;
    let columns = rows
        .columns()
        .map_err(anyhow::Error::from_boxed)
        .with_context(|| format!("Reading header of {input:?}"))?;
    let mut list = RecordList::new();
    let loaded = load_rows(&mut list, &mut rows);
    rows.close()
        .map_err(anyhow::Error::from_boxed)
        .context("Closing input")?;
    loaded.with_context(|| format!("Loading rows from {input:?}"))?;
    Ok((columns, list))
}

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let (columns, list) = load_csv(&args.input, args.delimiter)?;
    let rendered = table::render_records(&columns, list.iter().take(args.rows));
    print!("{rendered}");
    info!(
        "Displayed {} of {} record(s) from {:?}",
        list.len().min(args.rows),
        list.len(),
        args.input
    );
    Ok(())
}

pub fn dump(args: &DumpArgs) -> Result<()> {
    let (_, list) = load_csv(&args.input, args.delimiter)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &list {
        serde_json::to_writer(&mut out, &record.fields()).context("Writing record JSON")?;
        writeln!(out).context("Writing record JSON")?;
    }
    info!("Dumped {} record(s) from {:?}", list.len(), args.input);
    Ok(())
}
