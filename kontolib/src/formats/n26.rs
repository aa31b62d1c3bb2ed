//! CSV-экспорт N26: фиксированные колонки, суммы в EUR.

use crate::{
    error::{KontoError, Result},
    model::{FeeSummary, Record},
    traits::{Conversion, ReadExport, ReadOptions},
};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::io::BufRead;

const HEADERS: [&str; 9] = [
    "Date",
    "Payee",
    "Account number",
    "Transaction type",
    "Payment reference",
    "Amount (EUR)",
    "Amount (Foreign Currency)",
    "Type Foreign Currency",
    "Exchange Rate",
];

#[derive(serde::Deserialize)]
struct N26Row {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Payee")]
    payee: String,
    #[serde(rename = "Amount (EUR)")]
    amount: String,
}

pub struct N26Csv;

impl ReadExport for N26Csv {
    fn read<R: BufRead>(r: R, _opts: &ReadOptions) -> Result<Conversion> {
        let mut rdr = ReaderBuilder::new().from_reader(r);

        // шапка должна совпадать дословно — иначе банк поменял шаблон
        let headers = rdr.headers()?.clone();
        if headers.iter().ne(HEADERS) {
            return Err(KontoError::Parse(format!(
                "n26 header mismatch, expected {HEADERS:?}"
            )));
        }

        let mut records = Vec::new();
        for row in rdr.deserialize::<N26Row>() {
            let row = row?;
            let amount: Decimal = row
                .amount
                .parse()
                .map_err(|e| KontoError::Parse(format!("n26 amount: {e}")))?;
            records.push(Record {
                date: row.date,
                description: row.payee,
                amount,
                currency: "EUR".into(),
            });
        }

        Ok(Conversion {
            records,
            fees: FeeSummary::default(),
        })
    }
}
