//! Generated sample records.

use chrono::{Local, NaiveDate};
use fieldmap_core::Record;

/// `count` well-formed records dated today.
pub fn generated_records(count: usize) -> Vec<Record> {
    generated_records_on(count, Local::now().date_naive())
}

/// `count` well-formed records for [`Model`](crate::Model) and
/// [`InferredModel`](crate::InferredModel), numbered from 1, dated `date`.
///
/// Every record names the same fields in the same order: blank `Foo`/`Bar`,
/// and `Decimal`/`AnotherDate` with no value at all.
pub fn generated_records_on(count: usize, date: NaiveDate) -> Vec<Record> {
    let created_on = date.format("%m/%d/%Y").to_string();
    (1..=count)
        .map(|i| {
            let mut record = Record::with_capacity(10);
            record.insert("CustomIdentifier", i.to_string());
            record.insert("Label", "Foo");
            record.insert("Value", format!("{}", 777_f64 / i as f64));
            record.insert("CreatedOn", created_on.as_str());
            record.insert("IsDeleted", "false");
            record.insert("Foo", "");
            record.insert("Bar", "");
            record.insert("Number", "1337");
            record.insert_absent("Decimal");
            record.insert_absent("AnotherDate");
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_follow_the_sample_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let records = generated_records_on(3, date);
        assert_eq!(records.len(), 3);

        let third = &records[2];
        assert_eq!(third.get("CustomIdentifier"), Some(Some("3")));
        assert_eq!(third.get("Value"), Some(Some("259")));
        assert_eq!(third.get("CreatedOn"), Some(Some("01/02/2024")));
        assert_eq!(third.get("Decimal"), Some(None));
        assert_eq!(third.len(), 10);
    }
}
