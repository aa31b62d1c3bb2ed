//! CSV-экспорт Valiant: latin-1, разделитель «;», преамбула с номером
//! счёта перед таблицей. Берутся первые три колонки, описания проходят
//! ту же цепочку очистки, что и у CAMT-выписки того же банка.

use crate::{
    error::{KontoError, Result},
    model::{FeeSummary, Record},
    normalize::Cleaner,
    traits::{Conversion, ReadExport, ReadOptions},
};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::io::BufRead;

/// Строк преамбулы до таблицы (номер счёта, период и т.п.).
const PREAMBLE_LINES: usize = 10;

/// В экспорте нет колонки валюты; счёт ведётся в франках.
const CURRENCY: &str = "CHF";

pub struct ValiantCsv;

impl ReadExport for ValiantCsv {
    fn read<R: BufRead>(mut r: R, _opts: &ReadOptions) -> Result<Conversion> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        // latin-1: байт == код символа
        let text: String = bytes.iter().map(|&b| b as char).collect();

        let body = text
            .lines()
            .skip(PREAMBLE_LINES)
            .collect::<Vec<_>>()
            .join("\n");

        // has_headers съедает последнюю строку преамбулы; первой записью
        // обязана идти строка заголовков таблицы
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(body.as_bytes());

        let cleaner = Cleaner::new()?;
        let mut records = Vec::new();
        let mut saw_header = false;

        for row in rdr.records() {
            let row = row?;
            let first = row.get(0).unwrap_or("").trim();
            if first.is_empty() {
                continue;
            }
            if !saw_header {
                if first != "Datum" {
                    return Err(KontoError::Parse(
                        "first cell is not 'Datum', valiant probably changed their template"
                            .into(),
                    ));
                }
                saw_header = true;
                continue;
            }

            let cell = |i: usize| row.get(i).unwrap_or("").replace(',', "");
            let date = cell(0);
            let description = cleaner.clean(&cell(1));
            let amount: Decimal = cell(2)
                .trim()
                .parse()
                .map_err(|e| KontoError::Parse(format!("valiant amount: {e}")))?;

            records.push(Record {
                date,
                description,
                amount,
                currency: CURRENCY.into(),
            });
        }

        if !saw_header {
            return Err(KontoError::Parse(
                "first cell is not 'Datum', valiant probably changed their template".into(),
            ));
        }

        Ok(Conversion {
            records,
            fees: FeeSummary::default(),
        })
    }
}
