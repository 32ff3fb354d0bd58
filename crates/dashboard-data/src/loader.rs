//! CSV loading and validation for the transaction table.
//!
//! Validation runs in a fixed order so the reported error is deterministic:
//! existence, header schema, missing amounts and order IDs, positivity of
//! amounts and quantities, category membership, region membership, and
//! finally typing of the remaining columns. The first failed check wins.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dashboard_core::error::{DashboardError, IntegrityViolation, Result};
use dashboard_core::models::{
    Category, Region, Transaction, TransactionTable, REQUIRED_COLUMNS,
};
use dashboard_core::parsing::{is_missing, parse_date, parse_decimal, parse_integer};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// File name the dashboard expects its dataset under.
pub const EXPECTED_FILE_NAME: &str = "sales-data.csv";

// Positions inside a `RawRow`, matching `REQUIRED_COLUMNS`.
const DATE: usize = 0;
const ORDER_ID: usize = 1;
const PRODUCT: usize = 2;
const CATEGORY: usize = 3;
const REGION: usize = 4;
const QUANTITY: usize = 5;
const UNIT_PRICE: usize = 6;
const TOTAL_AMOUNT: usize = 7;

/// The eight required cells of one data line, in canonical column order.
type RawRow = [String; 8];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate the transaction file at `path`.
pub fn load_transactions(path: &Path) -> Result<TransactionTable> {
    if !path.is_file() {
        return Err(not_found(path));
    }

    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let table = load_from_reader(file)?;
    info!(
        path = %path.display(),
        records = table.len(),
        "loaded transaction table"
    );
    Ok(table)
}

/// Parse and validate CSV content from any reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<TransactionTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let positions = resolve_columns(csv_reader.headers()?)?;

    let mut rows: Vec<RawRow> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        // Short rows are padded with empty (missing) cells.
        rows.push(positions.map(|idx| record.get(idx).unwrap_or_default().to_string()));
    }
    debug!(rows = rows.len(), "read raw rows");

    validate(&rows)
}

// ── Validation pipeline ───────────────────────────────────────────────────────

/// Map each required column to its index in the header, or report every
/// missing column in canonical order.
fn resolve_columns(headers: &csv::StringRecord) -> Result<[usize; 8]> {
    let mut positions = [0usize; 8];
    let mut missing = Vec::new();

    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *name) {
            Some(idx) => positions[slot] = idx,
            None => missing.push((*name).to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(DashboardError::Schema { missing })
    }
}

fn validate(rows: &[RawRow]) -> Result<TransactionTable> {
    if rows.iter().any(|row| is_missing(&row[TOTAL_AMOUNT])) {
        return Err(IntegrityViolation::MissingAmounts.into());
    }
    if rows.iter().any(|row| is_missing(&row[ORDER_ID])) {
        return Err(IntegrityViolation::MissingOrderIds.into());
    }

    let amounts = typed_column(rows, TOTAL_AMOUNT, parse_decimal)?;
    if amounts.iter().any(|amount| *amount <= Decimal::ZERO) {
        return Err(IntegrityViolation::NonPositiveAmounts.into());
    }

    let quantities = typed_column(rows, QUANTITY, parse_integer)?;
    if quantities.iter().any(|quantity| *quantity < 1) {
        return Err(IntegrityViolation::InvalidQuantities.into());
    }

    let categories = enum_column::<Category>(rows, CATEGORY)
        .map_err(IntegrityViolation::InvalidCategories)?;
    let regions =
        enum_column::<Region>(rows, REGION).map_err(IntegrityViolation::InvalidRegions)?;

    let dates: Vec<NaiveDate> = typed_column(rows, DATE, parse_date)?;
    let unit_prices = typed_column(rows, UNIT_PRICE, parse_decimal)?;

    let mut records = Vec::with_capacity(rows.len());
    for (line, row) in rows.iter().enumerate() {
        let quantity = u32::try_from(quantities[line])
            .map_err(|_| malformed(line, QUANTITY, &row[QUANTITY]))?;
        records.push(Transaction {
            date: dates[line],
            order_id: row[ORDER_ID].clone(),
            product: row[PRODUCT].clone(),
            category: categories[line],
            region: regions[line],
            quantity,
            unit_price: unit_prices[line],
            total_amount: amounts[line],
        });
    }

    Ok(TransactionTable::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Convert one column with `parse`, failing on the first cell that is
/// missing or does not parse.
fn typed_column<T>(
    rows: &[RawRow],
    column: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>> {
    rows.iter()
        .enumerate()
        .map(|(line, row)| {
            let cell = &row[column];
            parse(cell).ok_or_else(|| DashboardError::from(malformed(line, column, cell)))
        })
        .collect()
}

/// Convert a closed-set column. On failure returns the distinct offending
/// values in first-seen order.
fn enum_column<T: std::str::FromStr>(
    rows: &[RawRow],
    column: usize,
) -> std::result::Result<Vec<T>, Vec<String>> {
    let mut values = Vec::with_capacity(rows.len());
    let mut invalid: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for row in rows {
        let cell = row[column].as_str();
        match cell.parse::<T>() {
            Ok(value) => values.push(value),
            Err(_) => {
                if seen.insert(cell) {
                    invalid.push(display_cell(cell));
                }
            }
        }
    }

    if invalid.is_empty() {
        Ok(values)
    } else {
        Err(invalid)
    }
}

fn malformed(line: usize, column: usize, cell: &str) -> IntegrityViolation {
    IntegrityViolation::MalformedValue {
        line: line + 1,
        column: REQUIRED_COLUMNS[column],
        value: display_cell(cell),
    }
}

fn display_cell(cell: &str) -> String {
    if cell.trim().is_empty() {
        "<empty>".to_string()
    } else {
        cell.to_string()
    }
}

fn not_found(path: &Path) -> DashboardError {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    DashboardError::NotFound {
        path: path.to_path_buf(),
        directory,
        expected_file: EXPECTED_FILE_NAME.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::error::ErrorKind;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "date,order_id,product,category,region,quantity,unit_price,total_amount";

    fn csv_with(rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        content
    }

    fn load_str(content: &str) -> Result<TransactionTable> {
        load_from_reader(content.as_bytes())
    }

    fn integrity(err: DashboardError) -> IntegrityViolation {
        match err {
            DashboardError::DataIntegrity(v) => v,
            other => panic!("expected DataIntegrity, got {other:?}"),
        }
    }

    // ── existence ─────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_is_not_found_with_path_and_name() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("data").join(EXPECTED_FILE_NAME);

        let err = load_transactions(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let msg = err.to_string();
        assert!(msg.contains(&path.display().to_string()));
        assert!(msg.contains(EXPECTED_FILE_NAME));
    }

    #[test]
    fn test_directory_is_not_a_data_file() {
        let tmp = TempDir::new().expect("tempdir");
        let err = load_transactions(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_load_from_disk() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join(EXPECTED_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            csv_with(&["2024-01-01,A,Earbuds,Audio,North,2,24.50,49.00"]).as_bytes(),
        )
        .unwrap();

        let table = load_transactions(&path).expect("load");
        assert_eq!(table.len(), 1);
        let record = &table.records()[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.order_id, "A");
        assert_eq!(record.category, Category::Audio);
        assert_eq!(record.region, Region::North);
        assert_eq!(record.quantity, 2);
        assert_eq!(record.unit_price, Decimal::new(2450, 2));
        assert_eq!(record.total_amount, Decimal::new(4900, 2));
    }

    // ── schema ────────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_columns_listed_in_canonical_order() {
        let content = "total_amount,date,order_id,product,category,quantity\n";
        let err = load_str(content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(
            err.to_string(),
            "CSV is missing required columns: region, unit_price"
        );
    }

    #[test]
    fn test_extra_and_reordered_columns_are_accepted() {
        let content = "region,notes,total_amount,date,order_id,product,category,quantity,unit_price\n\
                       West,gift,10.00,2024-02-01,X1,Watch,Wearables,1,10.00\n";
        let table = load_str(content).expect("load");
        assert_eq!(table.records()[0].region, Region::West);
        assert_eq!(table.records()[0].category, Category::Wearables);
        assert_eq!(table.records()[0].product, "Watch");
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let content = " date , order_id,product,category,region,quantity,unit_price,total_amount \n\
                       2024-02-01,X1,Watch,Wearables,East,1,10.00,10.00\n";
        assert_eq!(load_str(content).expect("load").len(), 1);
    }

    #[test]
    fn test_schema_checked_before_content() {
        // Missing region column and a missing amount: the schema error wins.
        let content = "date,order_id,product,category,quantity,unit_price,total_amount\n\
                       2024-01-01,A,Cable,Accessories,1,5.00,\n";
        assert_eq!(load_str(content).unwrap_err().kind(), ErrorKind::Schema);
    }

    // ── nulls ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_total_amount() {
        let content = csv_with(&[
            "2024-01-01,A,Cable,Accessories,North,1,5.00,5.00",
            "2024-01-02,B,Cable,Accessories,North,1,5.00,",
        ]);
        let err = load_str(&content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert_eq!(err.to_string(), "Data contains missing transaction amounts");
    }

    #[test]
    fn test_null_marker_counts_as_missing() {
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,North,1,5.00,NaN"]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::MissingAmounts
        );
    }

    #[test]
    fn test_short_row_pads_missing_amount() {
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,North,1,5.00"]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::MissingAmounts
        );
    }

    #[test]
    fn test_missing_amount_reported_before_missing_order_id() {
        let content = csv_with(&[
            "2024-01-01,,Cable,Accessories,North,1,5.00,5.00",
            "2024-01-02,B,Cable,Accessories,North,1,5.00,",
        ]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::MissingAmounts
        );
    }

    #[test]
    fn test_missing_order_id() {
        let content = csv_with(&["2024-01-01,,Cable,Accessories,North,1,5.00,5.00"]);
        let err = load_str(&content).unwrap_err();
        assert_eq!(err.to_string(), "Data contains missing order IDs");
    }

    // ── positivity ────────────────────────────────────────────────────────────

    #[test]
    fn test_non_positive_amount() {
        for amount in ["0", "-3.50"] {
            let row = format!("2024-01-01,A,Cable,Accessories,North,1,5.00,{amount}");
            let content = csv_with(&[row.as_str()]);
            assert_eq!(
                integrity(load_str(&content).unwrap_err()),
                IntegrityViolation::NonPositiveAmounts
            );
        }
    }

    #[test]
    fn test_amount_checked_before_quantity() {
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,North,0,5.00,-1"]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::NonPositiveAmounts
        );
    }

    #[test]
    fn test_invalid_quantity() {
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,North,0,5.00,5.00"]);
        let err = load_str(&content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Data contains invalid quantities (must be >= 1)"
        );
    }

    #[test]
    fn test_malformed_amount() {
        let content = csv_with(&[
            "2024-01-01,A,Cable,Accessories,North,1,5.00,5.00",
            "2024-01-01,B,Cable,Accessories,North,1,5.00,five",
        ]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::MalformedValue {
                line: 2,
                column: "total_amount",
                value: "five".to_string(),
            }
        );
    }

    #[test]
    fn test_fractional_quantity_is_malformed() {
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,North,1.5,5.00,5.00"]);
        assert!(matches!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::MalformedValue { column: "quantity", .. }
        ));
    }

    // ── enums ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_invalid_category_lists_distinct_values() {
        let content = csv_with(&[
            "2024-01-01,A,Rake,Garden,North,1,5.00,5.00",
            "2024-01-01,B,Hoe,Garden,North,1,5.00,5.00",
            "2024-01-01,C,Doll,Toys,North,1,5.00,5.00",
            "2024-01-01,D,Cable,Accessories,North,1,5.00,5.00",
        ]);
        let err = load_str(&content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert_eq!(
            err.to_string(),
            "Data contains invalid categories: Garden, Toys"
        );
    }

    #[test]
    fn test_category_checked_before_region() {
        let content = csv_with(&["2024-01-01,A,Rake,Garden,Central,1,5.00,5.00"]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::InvalidCategories(vec!["Garden".to_string()])
        );
    }

    #[test]
    fn test_invalid_region() {
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,Central,1,5.00,5.00"]);
        assert_eq!(
            load_str(&content).unwrap_err().to_string(),
            "Data contains invalid regions: Central"
        );
    }

    #[test]
    fn test_blank_category_is_reported() {
        let content = csv_with(&["2024-01-01,A,Cable,,North,1,5.00,5.00"]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::InvalidCategories(vec!["<empty>".to_string()])
        );
    }

    #[test]
    fn test_multi_word_category() {
        let content = csv_with(&["2024-01-01,A,Hub,Smart Home,South,1,80.00,80.00"]);
        assert_eq!(
            load_str(&content).expect("load").records()[0].category,
            Category::SmartHome
        );
    }

    // ── typing ────────────────────────────────────────────────────────────────

    #[test]
    fn test_unparseable_date() {
        let content = csv_with(&["someday,A,Cable,Accessories,North,1,5.00,5.00"]);
        assert_eq!(
            integrity(load_str(&content).unwrap_err()),
            IntegrityViolation::MalformedValue {
                line: 1,
                column: "date",
                value: "someday".to_string(),
            }
        );
    }

    #[test]
    fn test_unit_price_is_not_cross_checked() {
        // 3 x 5.00 != 2.00, which is accepted as-is.
        let content = csv_with(&["2024-01-01,A,Cable,Accessories,North,3,5.00,2.00"]);
        let table = load_str(&content).expect("load");
        assert_eq!(table.records()[0].total_amount, Decimal::new(200, 2));
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let table = load_str(&format!("{HEADER}\n")).expect("load");
        assert!(table.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let content = csv_with(&[r#"2024-01-01,"A-1","Cable, braided",Accessories,North,1,5.00,5.00"#]);
        let table = load_str(&content).expect("load");
        assert_eq!(table.records()[0].product, "Cable, braided");
    }

    #[test]
    fn test_order_ids_are_kept_verbatim() {
        let content = csv_with(&[
            "2024-01-01,A,Cable,Accessories,North,1,5.00,5.00",
            "2024-01-01,A ,Cable,Accessories,North,1,5.00,5.00",
        ]);
        let table = load_str(&content).expect("load");
        assert_eq!(table.records()[1].order_id, "A ");

        let kpis = crate::aggregator::SalesAggregator::compute_kpis(&table).unwrap();
        assert_eq!(kpis.total_orders, 2);
    }

    #[test]
    fn test_identical_input_loads_identically() {
        let content = csv_with(&[
            "2024-01-01,A,Cable,Accessories,North,1,5.00,5.00",
            "2024-01-02,B,Hub,Smart Home,West,2,40.00,80.00",
        ]);
        assert_eq!(load_str(&content).unwrap(), load_str(&content).unwrap());
    }
}
