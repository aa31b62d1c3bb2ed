//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{FeeSummary, Record},
};
use std::io::{BufRead, Write};

/// Параметры чтения, общие для всех источников. CSV-диалекты их игнорируют.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Имя владельца счёта, как оно встречается в выписке.
    pub self_name: String,
    /// Выделять вероятные комиссии банка отдельной строкой.
    pub include_bank_fees: bool,
}

/// Результат конвертации одного документа.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub records: Vec<Record>,
    pub fees: FeeSummary,
}

pub trait ReadExport {
    fn read<R: BufRead>(r: R, opts: &ReadOptions) -> Result<Conversion>;
}

pub trait WriteExport {
    fn write<W: Write>(w: W, records: &[Record]) -> Result<()>;
}
