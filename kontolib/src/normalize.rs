//! Очистка описаний: упорядоченная цепочка правил. Порядок фиксирован —
//! поздние правила рассчитывают, что ранние уже убрали свои фрагменты.

use crate::error::{KontoError, Result};
use regex::Regex;

enum Rule {
    /// Удалить все совпадения.
    Strip(Regex),
    /// Заменить все совпадения.
    Replace(Regex, &'static str),
    /// Удалить все совпадения и дописать суффикс, если было хоть одно.
    StripTag(Regex, &'static str),
}

/// Скомпилированная цепочка правил; собирается один раз на прогон.
pub struct Cleaner {
    rules: Vec<Rule>,
}

impl Cleaner {
    pub fn new() -> Result<Self> {
        let strip = |p: &str| -> Result<Rule> { Ok(Rule::Strip(re(p)?)) };
        let rules = vec![
            // префикс «покупка дебетовой картой» с датой и временем
            strip(r"Debitkarten-Einkauf \d{2}\.\d{2}\.\d{4} \d{2}:\d{2} ")?,
            strip(r"Zahlung - ")?,
            // маскированный номер карты в хвосте
            strip(r" - Karten-Nr\. \d{6}\*{6}\d{4}")?,
            Rule::Replace(re(r"Vergütung")?, "(Transfer)"),
            Rule::StripTag(re(r"TWINT Gutschrift")?, " (TWINT)"),
            Rule::StripTag(re(r"TWINT Belastung")?, " (TWINT)"),
            // номер карты, формат 1
            strip(r" Kartennummer: \d{16}")?,
            // номер карты, формат 2 (старые экспорты)
            strip(r" - Karten-Nr\. \w{16}")?,
            // избыточная сумма в хвосте
            strip(r" - \d+\.\d+ \D+")?,
            // дата и время в хвосте
            strip(r" - \d{2}\.\d{2}\.\d{4} \d{2}:\d{2}")?,
            // курсовая пометка: « - 2.50 EUR zum Kurs 1.04»
            strip(r" - \d+\.\d+ \D+ zum Kurs \d+\.\d+")?,
            // голый курс: «0.99131 = CHF 2.60»
            strip(r"\d+\.\d+ = \D+ \d+\.\d+")?,
            // пометка о комиссии: «Plus Spesen CHF 0.05»
            strip(r"Plus Spesen \D+ \d+\.\d+")?,
            // телефон отправителя TWINT
            strip(r" \+\d{11}")?,
            // оставшийся 16-значный номер TWINT
            strip(r" \d{16}")?,
            strip(r",")?,
        ];
        Ok(Cleaner { rules })
    }

    /// Прогоняет строку через все правила по порядку; несовпавшее
    /// правило — no-op, никогда не ошибка.
    pub fn clean(&self, s: &str) -> String {
        let mut out = s.to_string();
        for rule in &self.rules {
            match rule {
                Rule::Strip(r) => out = r.replace_all(&out, "").into_owned(),
                Rule::Replace(r, with) => out = r.replace_all(&out, *with).into_owned(),
                Rule::StripTag(r, tag) => {
                    if r.is_match(&out) {
                        out = r.replace_all(&out, "").into_owned();
                        out.push_str(tag);
                    }
                }
            }
        }
        out.trim().to_string()
    }
}

fn re(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| KontoError::Parse(e.to_string()))
}
