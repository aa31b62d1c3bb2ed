use chrono::NaiveDate;
use kontolib::{
    error::KontoError,
    model::{
        BatchTotal, DebitCredit, Entry, EntryDetail, Money, RelatedParties, Statement,
        Transaction,
    },
    reconcile::reconcile,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn entry(date: &str, amount: Decimal, info: &str, detail: EntryDetail) -> Entry {
    Entry {
        value_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
        amount,
        currency: "CHF".into(),
        info: info.into(),
        detail,
    }
}

fn tx(dc: DebitCredit, amount: Decimal) -> Transaction {
    Transaction {
        dc,
        amount,
        currency: "CHF".into(),
        tx_amount: None,
        parties: None,
    }
}

#[test]
fn sign_negated_for_debit_only() {
    let st = Statement {
        entries: vec![
            entry(
                "2023-01-05",
                dec!(20.00),
                "Einkauf",
                EntryDetail::Transactions(vec![tx(DebitCredit::Debit, dec!(20.00))]),
            ),
            entry(
                "2023-01-06",
                dec!(30.00),
                "Gutschrift",
                EntryDetail::Transactions(vec![tx(DebitCredit::Credit, dec!(30.00))]),
            ),
        ],
    };
    let (records, _) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(records[0].amount, dec!(-20.00));
    assert_eq!(records[1].amount, dec!(30.00));
}

#[test]
fn batched_entry_unbatched_into_per_transaction_records() {
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(60.00),
            "Sammelgutschrift",
            EntryDetail::Transactions(vec![
                tx(DebitCredit::Credit, dec!(10.00)),
                tx(DebitCredit::Credit, dec!(20.00)),
                tx(DebitCredit::Credit, dec!(30.00)),
            ]),
        )],
    };
    let (records, fees) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(fees.instances, 0);
    let amounts: Vec<_> = records.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![dec!(10.00), dec!(20.00), dec!(30.00)]);
    for r in &records {
        assert_eq!(r.date, "2023-01-05");
        assert_eq!(r.description, "Sammelgutschrift");
    }
}

#[test]
fn generic_label_replaced_by_counterparty() {
    let mut t = tx(DebitCredit::Credit, dec!(50.00));
    t.parties = Some(RelatedParties {
        creditor: "Ryan Smith".into(),
        debtor: "Jane Doe".into(),
    });
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(50.00),
            "Vergütung",
            EntryDetail::Transactions(vec![t]),
        )],
    };
    let (records, _) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(records[0].description, "Jane Doe");
}

#[test]
fn generic_label_with_self_as_debtor_uses_creditor() {
    let mut t = tx(DebitCredit::Debit, dec!(50.00));
    t.parties = Some(RelatedParties {
        creditor: "Jane Doe".into(),
        debtor: "Ryan Smith".into(),
    });
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(50.00),
            "Dauerauftrag",
            EntryDetail::Transactions(vec![t]),
        )],
    };
    let (records, _) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(records[0].description, "Jane Doe");
}

#[test]
fn self_name_on_neither_side_is_ambiguous() {
    let mut t = tx(DebitCredit::Credit, dec!(50.00));
    t.parties = Some(RelatedParties {
        creditor: "Jane Doe".into(),
        debtor: "John Roe".into(),
    });
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(50.00),
            "Vergütung",
            EntryDetail::Transactions(vec![t]),
        )],
    };
    match reconcile(&st, "Ryan", true) {
        Err(KontoError::AmbiguousParty(name)) => assert_eq!(name, "Ryan"),
        other => panic!("expected AmbiguousParty, got {other:?}"),
    }
}

#[test]
fn generic_label_without_parties_passes_through() {
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(50.00),
            "Dauerauftrag",
            EntryDetail::Transactions(vec![tx(DebitCredit::Debit, dec!(50.00))]),
        )],
    };
    let (records, _) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(records[0].description, "Dauerauftrag");
}

#[test]
fn matching_amounts_do_not_count_as_fee() {
    let mut t = tx(DebitCredit::Credit, dec!(100.00));
    t.tx_amount = Some(Money {
        amount: dec!(100.00),
        currency: "CHF".into(),
    });
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(100.00),
            "Gutschrift Lohn",
            EntryDetail::Transactions(vec![t]),
        )],
    };
    let (records, fees) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(fees.instances, 0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].description, "Gutschrift Lohn");
    assert_eq!(records[0].amount, dec!(100.00));
}

#[test]
fn fee_total_is_never_positive() {
    let mut t1 = tx(DebitCredit::Credit, dec!(100.00));
    t1.tx_amount = Some(Money {
        amount: dec!(98.00),
        currency: "CHF".into(),
    });
    let mut t2 = tx(DebitCredit::Debit, dec!(49.50));
    // комиссия и в другую сторону остаётся расходом
    t2.tx_amount = Some(Money {
        amount: dec!(50.00),
        currency: "CHF".into(),
    });
    let st = Statement {
        entries: vec![
            entry(
                "2023-01-05",
                dec!(100.00),
                "Gutschrift",
                EntryDetail::Transactions(vec![t1]),
            ),
            entry(
                "2023-01-07",
                dec!(49.50),
                "Einkauf",
                EntryDetail::Transactions(vec![t2]),
            ),
        ],
    };
    let (records, fees) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(fees.instances, 2);
    assert_eq!(fees.total, dec!(-2.50));

    let fee = records.last().expect("fee record");
    assert_eq!(fee.date, "2023-01-07");
    assert_eq!(
        fee.description,
        "2 probable bank fees from 2023-01-05 to 2023-01-07"
    );
    assert_eq!(fee.amount, dec!(-2.50));
}

#[test]
fn records_keep_decode_order_with_fee_record_last() {
    let mut fee_tx = tx(DebitCredit::Debit, dec!(10.00));
    fee_tx.tx_amount = Some(Money {
        amount: dec!(9.00),
        currency: "CHF".into(),
    });
    let st = Statement {
        entries: vec![
            entry(
                "2023-01-05",
                dec!(1.00),
                "Erste",
                EntryDetail::Transactions(vec![tx(DebitCredit::Credit, dec!(1.00))]),
            ),
            entry(
                "2023-01-06",
                dec!(10.00),
                "Zweite",
                EntryDetail::Transactions(vec![fee_tx]),
            ),
            entry(
                "2023-01-07",
                dec!(3.00),
                "Dritte",
                EntryDetail::Batch(BatchTotal {
                    dc: DebitCredit::Debit,
                    total: dec!(3.00),
                    currency: "CHF".into(),
                }),
            ),
        ],
    };
    let (records, _) = reconcile(&st, "Ryan", true).expect("reconcile");
    let descs: Vec<_> = records.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(
        descs,
        vec![
            "Erste",
            "Zweite (excl. 1.00 bank fee)",
            "Dritte",
            "1 probable bank fees from 2023-01-05 to 2023-01-07",
        ]
    );
}

#[test]
fn batch_only_statement_never_produces_fee_record() {
    let batch = |d: &str| {
        entry(
            d,
            dec!(40.00),
            "Sammelauftrag",
            EntryDetail::Batch(BatchTotal {
                dc: DebitCredit::Debit,
                total: dec!(40.00),
                currency: "CHF".into(),
            }),
        )
    };
    let st = Statement {
        entries: vec![batch("2023-01-05"), batch("2023-01-06")],
    };
    let (records, fees) = reconcile(&st, "Ryan", true).expect("reconcile");
    assert_eq!(fees.instances, 0);
    assert_eq!(fees.total, Decimal::ZERO);
    assert_eq!(records.len(), 2);
}

#[test]
fn fees_disabled_ignores_secondary_amounts() {
    let mut t = tx(DebitCredit::Credit, dec!(100.00));
    t.tx_amount = Some(Money {
        amount: dec!(98.00),
        currency: "CHF".into(),
    });
    let st = Statement {
        entries: vec![entry(
            "2023-01-05",
            dec!(100.00),
            "Gutschrift",
            EntryDetail::Transactions(vec![t]),
        )],
    };
    let (records, fees) = reconcile(&st, "Ryan", false).expect("reconcile");
    assert_eq!(fees.instances, 0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, dec!(100.00));
    assert_eq!(records[0].description, "Gutschrift");
}
