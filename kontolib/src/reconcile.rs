//! Сверка и нормализация: обход типизированной выписки, разгруппировка
//! пачек, вывод вероятных комиссий из расхождений сумм, знак по
//! CdtDbtInd, замена служебных описаний на имя контрагента и очистка
//! текста. Счётчики комиссий — явные значения результата, не скрытое
//! состояние.

use crate::{
    error::{KontoError, Result},
    model::{DebitCredit, EntryDetail, FeeSummary, Record, RelatedParties, Statement},
    normalize::Cleaner,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Служебные описания, вместо которых подставляется имя контрагента.
const GENERIC_LABELS: [&str; 2] = ["Vergütung", "Dauerauftrag"];

/// Превращает выписку в плоский список канонических транзакций плюс
/// сводку комиссий. Записи идут в порядке декодирования, проводки внутри
/// записи — в исходном порядке; синтетическая строка комиссий — последней.
pub fn reconcile(
    st: &Statement,
    self_name: &str,
    include_bank_fees: bool,
) -> Result<(Vec<Record>, FeeSummary)> {
    let cleaner = Cleaner::new()?;
    let mut records = Vec::new();
    let mut fee_instances = 0u32;
    let mut fee_total = Decimal::ZERO;
    let mut fee_currency: Option<String> = None;

    for entry in &st.entries {
        let date = entry.value_date.format("%Y-%m-%d").to_string();
        match &entry.detail {
            EntryDetail::Transactions(txs) => {
                for tx in txs {
                    let mut desc = entry.info.clone();
                    let mut amount = tx.amount;

                    // вывод комиссии: только несгруппированная одиночная
                    // проводка со «второй» суммой уровня транзакции
                    if include_bank_fees && txs.len() == 1 {
                        if let Some(extra) = &tx.tx_amount {
                            if tx.currency != entry.currency {
                                return Err(KontoError::CurrencyMismatch {
                                    entry: entry.currency.clone(),
                                    tx: tx.currency.clone(),
                                });
                            }
                            let fee = (extra.amount - entry.amount).abs();
                            if !fee.is_zero() {
                                debug!(
                                    info = %entry.info,
                                    %fee,
                                    "transaction amount differs from entry amount, potential fee"
                                );
                                fee_instances += 1;
                                fee_total -= fee;
                                fee_currency.get_or_insert_with(|| tx.currency.clone());
                                desc = format!("{desc} (excl. {fee:.2} bank fee)");
                            }
                            // сумма до комиссии, не сумма записи
                            amount = extra.amount;
                        }
                    }

                    let desc = rename_for_self(&desc, self_name, tx.parties.as_ref())?;
                    records.push(Record {
                        date: date.clone(),
                        description: cleaner.clean(&desc),
                        amount: signed(amount, tx.dc),
                        currency: tx.currency.clone(),
                    });
                }
            }
            EntryDetail::Batch(batch) => {
                records.push(Record {
                    date: date.clone(),
                    description: cleaner.clean(&entry.info),
                    amount: signed(batch.total, batch.dc),
                    currency: batch.currency.clone(),
                });
            }
        }
    }

    let mut fees = FeeSummary::default();
    if include_bank_fees && fee_instances > 0 {
        let total = fee_total.round_dp(2);
        info!(
            instances = fee_instances,
            %total,
            "entry/tx amount differences found, probable bank fees"
        );
        let min_date = records.iter().map(|r| r.date.as_str()).min().unwrap_or("");
        let max_date = records.iter().map(|r| r.date.as_str()).max().unwrap_or("");
        let desc = format!("{fee_instances} probable bank fees from {min_date} to {max_date}");
        let record = Record {
            date: max_date.to_string(),
            description: cleaner.clean(&desc),
            amount: total,
            currency: fee_currency.unwrap_or_default(),
        };
        records.push(record);
        fees = FeeSummary {
            instances: fee_instances,
            total,
        };
    }

    Ok((records, fees))
}

/// Если описание — служебная пометка банка и контрагенты известны,
/// подставляет имя «другой стороны» относительно self_name.
fn rename_for_self(
    desc: &str,
    self_name: &str,
    parties: Option<&RelatedParties>,
) -> Result<String> {
    if !GENERIC_LABELS.contains(&desc) {
        return Ok(desc.to_string());
    }
    let Some(p) = parties else {
        return Ok(desc.to_string());
    };
    if p.creditor.contains(self_name) {
        Ok(p.debtor.clone())
    } else if p.debtor.contains(self_name) {
        Ok(p.creditor.clone())
    } else {
        Err(KontoError::AmbiguousParty(self_name.to_string()))
    }
}

fn signed(amount: Decimal, dc: DebitCredit) -> Decimal {
    match dc {
        DebitCredit::Debit => -amount,
        DebitCredit::Credit => amount,
    }
}
