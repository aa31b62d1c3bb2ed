//! kontolib — нормализация банковских экспортов (CAMT.053 XML и CSV-диалекты)
//! в единый список транзакций: дата, описание, сумма, валюта.

pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod traits;

pub mod formats {
    pub mod camt053;
    pub mod csv;
    pub mod n26;
    pub mod valiant;
    pub mod wise;
}
