use clap::{Parser, ValueEnum};
use kontolib::{
    error::{KontoError, Result},
    formats::{camt053::Camt053, csv::Csv, n26::N26Csv, valiant::ValiantCsv, wise::WiseCsv},
    traits::{ReadExport, ReadOptions, WriteExport},
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Source {
    /// Valiant, выписка CAMT.053 (XML)
    ValiantCamt,
    /// Valiant, CSV-экспорт
    ValiantCsv,
    N26,
    Wise,
}

#[derive(Parser, Debug)]
#[command(name = "konto", version, about = "Нормализация банковских выписок в единый CSV")]
struct Cli {
    /// Источник экспорта
    #[arg(long = "source", value_enum)]
    source: Source,

    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Имя владельца счёта, как оно встречается в выписке
    #[arg(long = "me", default_value = "Ryan")]
    me: String,

    /// Выделять вероятные комиссии банка отдельной строкой
    #[arg(long = "include-bank-fees", default_value_t = true, action = clap::ArgAction::Set)]
    include_bank_fees: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // reader
    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let opts = ReadOptions {
        self_name: cli.me,
        include_bank_fees: cli.include_bank_fees,
    };

    let conv = match cli.source {
        Source::ValiantCamt => Camt053::read(br, &opts),
        Source::ValiantCsv => ValiantCsv::read(br, &opts),
        Source::N26 => N26Csv::read(br, &opts),
        Source::Wise => WiseCsv::read(br, &opts),
    }?;

    if conv.fees.instances > 0 {
        tracing::info!(
            instances = conv.fees.instances,
            total = %conv.fees.total,
            "probable bank fees included as a separate line item"
        );
    }

    // writer
    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    Csv::write(&mut writer, &conv.records)?;
    writer.flush().map_err(KontoError::from)
}
