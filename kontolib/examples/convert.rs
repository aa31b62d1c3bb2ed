use kontolib::{
    formats::{camt053::Camt053, csv::Csv},
    traits::{ReadExport, ReadOptions, WriteExport},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: конвертируем CAMT.053 -> канонический CSV (stdin -> stdout)
    let opts = ReadOptions {
        self_name: "Ryan".into(),
        include_bank_fees: true,
    };
    let conv = Camt053::read(std::io::BufReader::new(std::io::stdin()), &opts)?;
    Csv::write(std::io::stdout(), &conv.records)?;
    Ok(())
}
