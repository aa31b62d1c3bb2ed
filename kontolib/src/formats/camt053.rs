//! Декодер CAMT.053 (bank-to-customer statement). Сырой XML разбирается
//! в serde-структуры, затем форма проверяется один раз и строится
//! типизированное дерево из model — дальше по полям «наугад» никто не ходит.

use crate::{
    error::{KontoError, Result},
    model::{
        BatchTotal, DebitCredit, Entry, EntryDetail, Money, RelatedParties, Statement,
        Transaction,
    },
    reconcile::reconcile,
    traits::{Conversion, ReadExport, ReadOptions},
};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::BufRead;

pub struct Camt053;

impl ReadExport for Camt053 {
    fn read<R: BufRead>(r: R, opts: &ReadOptions) -> Result<Conversion> {
        let st = decode(r)?;
        let (records, fees) = reconcile(&st, &opts.self_name, opts.include_bank_fees)?;
        Ok(Conversion { records, fees })
    }
}

/* --------------------------- сырые serde-структуры ----------------------- */

#[derive(Debug, Deserialize)]
struct XmlDocument {
    #[serde(rename = "BkToCstmrStmt")]
    body: XmlBkToCstmrStmt,
}

#[derive(Debug, Deserialize)]
struct XmlBkToCstmrStmt {
    #[serde(rename = "Stmt", default)]
    statements: Vec<XmlStmt>,
}

#[derive(Debug, Deserialize)]
struct XmlStmt {
    #[serde(rename = "Ntry", default)]
    entries: Vec<XmlNtry>,
}

#[derive(Debug, Deserialize)]
struct XmlNtry {
    #[serde(rename = "Amt")]
    amount: Option<XmlAmt>,
    #[serde(rename = "ValDt")]
    value_date: Option<XmlValDt>,
    #[serde(rename = "NtryDtls", default)]
    details: Vec<XmlNtryDtls>,
    #[serde(rename = "AddtlNtryInf", default)]
    info: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct XmlAmt {
    #[serde(rename = "@Ccy")]
    ccy: String,
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct XmlValDt {
    #[serde(rename = "Dt")]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlNtryDtls {
    #[serde(rename = "TxDtls", default)]
    transactions: Vec<XmlTxDtls>,
    #[serde(rename = "Btch")]
    batch: Option<XmlBtch>,
}

#[derive(Debug, Deserialize)]
struct XmlTxDtls {
    #[serde(rename = "CdtDbtInd")]
    dc: Option<String>,
    #[serde(rename = "Amt")]
    amount: Option<XmlAmt>,
    #[serde(rename = "AmtDtls")]
    amount_details: Option<XmlAmtDtls>,
    #[serde(rename = "RltdPties")]
    related_parties: Option<XmlRltdPties>,
}

#[derive(Debug, Deserialize)]
struct XmlAmtDtls {
    #[serde(rename = "TxAmt")]
    tx_amount: Option<XmlTxAmt>,
}

#[derive(Debug, Deserialize)]
struct XmlTxAmt {
    #[serde(rename = "Amt")]
    amount: Option<XmlAmt>,
}

#[derive(Debug, Deserialize)]
struct XmlRltdPties {
    #[serde(rename = "Cdtr")]
    creditor: Option<XmlParty>,
    #[serde(rename = "Dbtr")]
    debtor: Option<XmlParty>,
}

#[derive(Debug, Deserialize)]
struct XmlParty {
    #[serde(rename = "Nm")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlBtch {
    #[serde(rename = "CdtDbtInd")]
    dc: Option<String>,
    #[serde(rename = "TtlAmt")]
    total: Option<XmlAmt>,
}

/* ------------------------------- DECODE ---------------------------------- */

/// Разбирает байты одного документа CAMT.053 в типизированную выписку.
/// Перед структурным разбором из разметки убирается ровно одно объявление
/// default-namespace — первое вхождение; вложенные объявления не трогаем.
pub fn decode<R: BufRead>(mut r: R) -> Result<Statement> {
    let mut raw = String::new();
    r.read_to_string(&mut raw)?;

    let ns = Regex::new(r#" xmlns="[^"]+""#).map_err(|e| KontoError::Parse(e.to_string()))?;
    let stripped = ns.replace(&raw, "");

    let doc: XmlDocument =
        quick_xml::de::from_str(&stripped).map_err(|e| KontoError::Malformed(e.to_string()))?;

    let mut statements = doc.body.statements;
    if statements.len() != 1 {
        return Err(KontoError::UnsupportedShape(format!(
            "expected exactly one statement, got {}",
            statements.len()
        )));
    }

    let stmt = statements.remove(0);
    let mut entries = Vec::with_capacity(stmt.entries.len());
    for ntry in stmt.entries {
        entries.push(convert_entry(ntry)?);
    }
    Ok(Statement { entries })
}

fn convert_entry(ntry: XmlNtry) -> Result<Entry> {
    let (amount, currency) = parse_amount(require(ntry.amount, "entry Amt")?)?;

    let date_str = require(ntry.value_date, "entry ValDt")?.date;
    let value_date = NaiveDate::parse_from_str(&require(date_str, "entry ValDt/Dt")?, "%Y-%m-%d")
        .map_err(|e| KontoError::Parse(format!("value date: {e}")))?;

    // ровно одна строка описания на запись
    let mut info = ntry.info;
    if info.len() != 1 {
        return Err(KontoError::UnsupportedShape(format!(
            "expected exactly one AddtlNtryInf per entry, got {}",
            info.len()
        )));
    }
    let info = info.remove(0);

    // ровно один NtryDtls на запись
    let mut details = ntry.details;
    if details.len() != 1 {
        return Err(KontoError::UnsupportedShape(format!(
            "expected exactly one NtryDtls per entry, got {}",
            details.len()
        )));
    }
    let detail = details.remove(0);

    // форма детали: проводки (случай A) либо итог пачки (случай B)
    let detail = if !detail.transactions.is_empty() {
        let mut txs = Vec::with_capacity(detail.transactions.len());
        for tx in detail.transactions {
            txs.push(convert_transaction(tx)?);
        }
        EntryDetail::Transactions(txs)
    } else if let Some(batch) = detail.batch {
        let (total, currency) = parse_amount(require(batch.total, "batch TtlAmt")?)?;
        EntryDetail::Batch(BatchTotal {
            dc: parse_dc(&require(batch.dc, "batch CdtDbtInd")?)?,
            total,
            currency,
        })
    } else {
        return Err(KontoError::UnsupportedShape(
            "entry detail has neither TxDtls nor Btch".into(),
        ));
    };

    Ok(Entry {
        value_date,
        amount,
        currency,
        info,
        detail,
    })
}

fn convert_transaction(tx: XmlTxDtls) -> Result<Transaction> {
    let dc = parse_dc(&require(tx.dc, "transaction CdtDbtInd")?)?;
    let (amount, currency) = parse_amount(require(tx.amount, "transaction Amt")?)?;

    let tx_amount = match tx.amount_details {
        Some(dtls) => {
            let amt = require(
                dtls.tx_amount.and_then(|t| t.amount),
                "AmtDtls/TxAmt/Amt",
            )?;
            let (amount, currency) = parse_amount(amt)?;
            Some(Money { amount, currency })
        }
        None => None,
    };

    let parties = match tx.related_parties {
        Some(p) => Some(RelatedParties {
            creditor: require(p.creditor.and_then(|c| c.name), "RltdPties/Cdtr/Nm")?,
            debtor: require(p.debtor.and_then(|d| d.name), "RltdPties/Dbtr/Nm")?,
        }),
        None => None,
    };

    Ok(Transaction {
        dc,
        amount,
        currency,
        tx_amount,
        parties,
    })
}

fn parse_amount(amt: XmlAmt) -> Result<(Decimal, String)> {
    let value = Decimal::from_str_exact(amt.value.trim())
        .or_else(|_| amt.value.trim().parse())
        .map_err(|e| KontoError::Parse(format!("camt amount: {e}")))?;
    Ok((value, amt.ccy))
}

fn parse_dc(s: &str) -> Result<DebitCredit> {
    match s {
        "CRDT" => Ok(DebitCredit::Credit),
        "DBIT" => Ok(DebitCredit::Debit),
        other => Err(KontoError::Parse(format!("CdtDbtInd {other}"))),
    }
}

fn require<T>(v: Option<T>, what: &str) -> Result<T> {
    v.ok_or_else(|| KontoError::UnsupportedShape(format!("missing {what}")))
}
