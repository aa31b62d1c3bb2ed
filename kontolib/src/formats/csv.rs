//! Канонический CSV-выход: date,description,amount,currency.

use crate::{
    error::Result,
    model::Record,
    traits::WriteExport,
};
use csv::WriterBuilder;
use std::io::Write;

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    date: &'a str,
    description: &'a str,
    amount: String,
    currency: &'a str,
}

pub struct Csv;

impl WriteExport for Csv {
    fn write<W: Write>(mut w: W, records: &[Record]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        for r in records {
            wrt.serialize(CsvOutRow {
                date: &r.date,
                description: &r.description,
                amount: r.amount.to_string(),
                currency: &r.currency,
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
