//! CSV-экспорт Wise (TransferWise): фиксированные колонки, валюта в строке.

use crate::{
    error::{KontoError, Result},
    model::{FeeSummary, Record},
    traits::{Conversion, ReadExport, ReadOptions},
};
use csv::ReaderBuilder;
use regex::Regex;
use rust_decimal::Decimal;
use std::io::BufRead;

const HEADERS: [&str; 19] = [
    "TransferWise ID",
    "Date",
    "Amount",
    "Currency",
    "Description",
    "Payment Reference",
    "Running Balance",
    "Exchange From",
    "Exchange To",
    "Exchange Rate",
    "Payer Name",
    "Payee Name",
    "Payee Account Number",
    "Merchant",
    "Card Last Four Digits",
    "Card Holder Full Name",
    "Attachment",
    "Note",
    "Total fees",
];

#[derive(serde::Deserialize)]
struct WiseRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Description")]
    description: String,
}

pub struct WiseCsv;

impl ReadExport for WiseCsv {
    fn read<R: BufRead>(r: R, _opts: &ReadOptions) -> Result<Conversion> {
        let mut rdr = ReaderBuilder::new().from_reader(r);

        let headers = rdr.headers()?.clone();
        if headers.iter().ne(HEADERS) {
            return Err(KontoError::Parse(format!(
                "wise header mismatch, expected {HEADERS:?}"
            )));
        }

        // префикс «Card transaction of 40.00 CHF issued by » избыточен
        let card_prefix = Regex::new(r"Card transaction of \d+\.\d+ \D+ issued by ")
            .map_err(|e| KontoError::Parse(e.to_string()))?;

        let mut records = Vec::new();
        for row in rdr.deserialize::<WiseRow>() {
            let row = row?;
            let amount: Decimal = row
                .amount
                .parse()
                .map_err(|e| KontoError::Parse(format!("wise amount: {e}")))?;
            records.push(Record {
                date: row.date,
                description: card_prefix.replace_all(&row.description, "").into_owned(),
                amount,
                currency: row.currency,
            });
        }

        Ok(Conversion {
            records,
            fees: FeeSummary::default(),
        })
    }
}
