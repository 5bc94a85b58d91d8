//! Short date strings, for people to read.

use pad::{PadStr, Alignment};

use crate::cal::{CalendarFields, CalendarId};


/// Renders the fields of a date in the manner of its calendar:
///
/// - Milesian: `[milesian] 31 10m 2020`, the year written with at least
///   three digits;
/// - Julian and Western: `[julian] 4/10/1582 ad`, with the era and the
///   year counted in it.
pub fn date_string(id: &CalendarId, fields: &CalendarFields) -> String {
    match id {
        CalendarId::Milesian => {
            let sign = if fields.year < 0 { "-" } else { "" };
            let year = fields.year.abs().to_string().pad(3, '0', Alignment::Right, false);
            format!("[{}] {} {}m {}{}", id.name(), fields.day, fields.month, sign, year)
        }

        _ => {
            let mut string = format!("[{}] {}/{}/{}", id.name(), fields.day, fields.month,
                                     fields.era_year.unwrap_or(fields.year));
            if let Some(era) = fields.era {
                string.push(' ');
                string.push_str(&era.to_string());
            }
            string
        }
    }
}
