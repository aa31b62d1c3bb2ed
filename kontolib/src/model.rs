//! Доменные модели: типизированное дерево выписки CAMT и «нормализованный»
//! выходной слой, общий для всех форматов.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebitCredit {
    Debit,
    Credit,
}

/// Сумма с валютой (код ISO).
#[derive(Debug, Clone, PartialEq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

/// Контрагенты проводки; банк указывает обе стороны сразу.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedParties {
    pub creditor: String,
    pub debtor: String,
}

/// Одна проводка внутри записи. `tx_amount` — «вторая» сумма уровня
/// транзакции; присутствует только у несгруппированных проводок и может
/// законно отличаться от суммы записи.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub dc: DebitCredit,
    pub amount: Decimal,
    pub currency: String,
    pub tx_amount: Option<Money>,
    pub parties: Option<RelatedParties>,
}

/// Итог пачки без разбивки по проводкам.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTotal {
    pub dc: DebitCredit,
    pub total: Decimal,
    pub currency: String,
}

/// Содержимое записи: либо проводки (возможно, сгруппированные банком),
/// либо только итог пачки.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDetail {
    Transactions(Vec<Transaction>),
    Batch(BatchTotal),
}

/// Одна запись журнала, как её сообщил банк. Ровно одна строка
/// описания — форма проверяется при декодировании, не при доступе.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value_date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub info: String,
    pub detail: EntryDetail,
}

/// Выписка целиком; ровно одна на входной документ. Пустой список
/// записей — корректная пустая выписка.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub entries: Vec<Entry>,
}

/// Каноническая транзакция — единица выхода. Дата передаётся строкой
/// как есть, без переинтерпретации формата источника. Положительная
/// сумма — приход, отрицательная — расход.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Сводка вероятных комиссий банка; итог всегда <= 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeeSummary {
    pub instances: u32,
    pub total: Decimal,
}
