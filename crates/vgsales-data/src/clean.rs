//! Cleaning pipeline
//!
//! Turns a [`RawTable`] into a typed, de-duplicated [`GameTable`] with a
//! derived `total_sales` column. The steps run in a fixed order, each one
//! consuming its input and returning a new value:
//!
//! ```text
//! RawTable
//!   -> normalize_headers      lower-case column names
//!   -> coerce_types           typed GameRecords (tbd user scores become null)
//!   -> repair_missing_identity  merge the two nameless rows into "Unknown"
//!   -> resolve_duplicates     first row per (name, platform, year)
//!   -> derive_total_sales     GameTable
//! ```
//!
//! Missing years, scores and ratings are left null throughout. Values are
//! never inferred from other rows: the same title carries different scores
//! and ratings on different platforms.
//!
//! Every step is idempotent, so cleaning a cleaned table again is a no-op.
//!
//! # Example
//!
//! ```
//! use vgsales_data::{clean, table::RawTable};
//!
//! let csv = "\
//! Name,Platform,Year_of_Release,Genre,NA_sales,EU_sales,JP_sales,Other_sales,Critic_Score,User_Score,Rating
//! Foo,X360,2010.0,Action,1.0,0.5,0.0,0.1,80.0,tbd,T
//! Foo,X360,2010.0,Action,1.0,0.5,0.0,0.1,80.0,tbd,T
//! ";
//! let table = clean::clean(RawTable::from_reader(csv.as_bytes())?)?;
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.games()[0].user_score, None);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashSet;

use csv::StringRecord;

use crate::{
    error::{CleanError, PreconditionError, SchemaError},
    record::{self, Game, GameRecord, Region, RegionalSales},
    table::{GameTable, RawTable},
};

/// Placeholder for a user score that has not been determined yet.
pub const USER_SCORE_SENTINEL: &str = "tbd";

/// Name and genre given to the record rebuilt from the nameless rows.
pub const UNKNOWN_IDENTITY: &str = "Unknown";

pub const MIN_YEAR: i32 = 1980;
pub const MAX_YEAR: i32 = 2016;

/// Runs the complete cleaning pipeline.
pub fn clean(raw: RawTable) -> Result<GameTable, CleanError> {
    tracing::info!(rows = raw.len(), "cleaning raw table");

    let raw = normalize_headers(raw);
    let records = coerce_types(&raw)?;
    tracing::info!(rows = records.len(), "coerced column types");

    let records = repair_missing_identity(records)?;
    let before = records.len();
    let records = resolve_duplicates(records);
    tracing::info!(
        rows = records.len(),
        dropped = before - records.len(),
        "resolved duplicate releases"
    );

    let table = derive_total_sales(records)?;
    tracing::info!(rows = table.len(), "cleaned table ready");
    Ok(table)
}

/// Lower-cases every column name.
#[must_use]
pub fn normalize_headers(raw: RawTable) -> RawTable {
    let headers = raw.headers().iter().map(|h| h.to_lowercase()).collect();
    raw.with_headers(headers)
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    platform: usize,
    year_of_release: usize,
    genre: usize,
    sales: [(Region, usize); 4],
    critic_score: usize,
    user_score: usize,
    rating: usize,
}

impl ColumnIndex {
    /// Looks columns up in schema order, so the first missing one is reported.
    fn resolve(raw: &RawTable) -> Result<Self, SchemaError> {
        let name = raw.column_index(record::NAME)?;
        let platform = raw.column_index(record::PLATFORM)?;
        let year_of_release = raw.column_index(record::YEAR_OF_RELEASE)?;
        let genre = raw.column_index(record::GENRE)?;
        let mut sales = [(Region::Na, 0); 4];
        for (slot, region) in sales.iter_mut().zip(Region::ALL) {
            *slot = (region, raw.column_index(region.column())?);
        }
        Ok(Self {
            name,
            platform,
            year_of_release,
            genre,
            sales,
            critic_score: raw.column_index(record::CRITIC_SCORE)?,
            user_score: raw.column_index(record::USER_SCORE)?,
            rating: raw.column_index(record::RATING)?,
        })
    }
}

/// Converts every raw row into a typed [`GameRecord`].
///
/// Expects normalized (lower-case) headers. Fails on the first value that
/// cannot be coerced; nothing is truncated or guessed.
pub fn coerce_types(raw: &RawTable) -> Result<Vec<GameRecord>, SchemaError> {
    let columns = ColumnIndex::resolve(raw)?;
    raw.rows()
        .iter()
        .enumerate()
        .map(|(row, fields)| coerce_row(row, fields, &columns))
        .collect()
}

fn coerce_row(
    row: usize,
    fields: &StringRecord,
    columns: &ColumnIndex,
) -> Result<GameRecord, SchemaError> {
    let field = |index: usize| fields.get(index).unwrap_or("");

    let platform = optional_text(field(columns.platform)).ok_or(SchemaError::MissingValue {
        row,
        column: record::PLATFORM,
    })?;

    let mut sales = RegionalSales::default();
    for (region, index) in columns.sales {
        *sales.get_mut(region) = parse_sales(row, region.column(), field(index))?;
    }

    Ok(GameRecord {
        row,
        name: optional_text(field(columns.name)),
        platform,
        year_of_release: parse_year(row, field(columns.year_of_release))?,
        genre: optional_text(field(columns.genre)),
        sales,
        critic_score: parse_score(row, record::CRITIC_SCORE, field(columns.critic_score), 100.0)?,
        user_score: parse_user_score(row, field(columns.user_score))?,
        rating: optional_text(field(columns.rating)),
    })
}

fn optional_text(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_owned())
}

fn invalid(row: usize, column: &'static str, value: &str, reason: &'static str) -> SchemaError {
    SchemaError::InvalidValue {
        row,
        column,
        value: value.to_owned(),
        reason,
    }
}

fn parse_number(row: usize, column: &'static str, value: &str) -> Result<f64, SchemaError> {
    let number = value
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(row, column, value, "not a number"))?;
    if !number.is_finite() {
        return Err(invalid(row, column, value, "not a finite number"));
    }
    Ok(number)
}

/// Parses a nullable release year.
///
/// Integral float text such as `2006.0` is accepted since years are often
/// exported as floats next to missing values.
#[expect(clippy::cast_possible_truncation)]
fn parse_year(row: usize, value: &str) -> Result<Option<i32>, SchemaError> {
    let column = record::YEAR_OF_RELEASE;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let year = match trimmed.parse::<i32>() {
        Ok(year) => year,
        Err(_) => {
            let number = parse_number(row, column, value)?;
            if number.fract() != 0.0 {
                return Err(invalid(row, column, value, "not an integer"));
            }
            // saturates; out-of-range values are rejected below
            number as i32
        }
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid(row, column, value, "outside 1980..=2016"));
    }
    Ok(Some(year))
}

fn parse_sales(row: usize, column: &'static str, value: &str) -> Result<f64, SchemaError> {
    if value.trim().is_empty() {
        return Ok(0.0);
    }
    let sales = parse_number(row, column, value)?;
    if sales < 0.0 {
        return Err(invalid(row, column, value, "negative sales"));
    }
    Ok(sales)
}

fn parse_score(
    row: usize,
    column: &'static str,
    value: &str,
    max: f64,
) -> Result<Option<f64>, SchemaError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let score = parse_number(row, column, value)?;
    if !(0.0..=max).contains(&score) {
        return Err(invalid(row, column, value, "score out of range"));
    }
    Ok(Some(score))
}

/// Parses a user score, mapping the `tbd` sentinel to unknown first.
fn parse_user_score(row: usize, value: &str) -> Result<Option<f64>, SchemaError> {
    if value.trim() == USER_SCORE_SENTINEL {
        return Ok(None);
    }
    parse_score(row, record::USER_SCORE, value, 10.0)
}

/// Rebuilds the one release whose name was lost across two rows.
///
/// The input is expected to hold either no nameless rows (already repaired)
/// or exactly two that share platform and year. The earlier row survives,
/// renamed to `"Unknown"` with genre `"Unknown"`, and takes each non-zero
/// regional sales figure of the later row where its own is zero. The later
/// row is dropped. Any other shape of nameless rows is an error.
pub fn repair_missing_identity(
    records: Vec<GameRecord>,
) -> Result<Vec<GameRecord>, PreconditionError> {
    let nameless = records
        .iter()
        .filter(|r| r.name.is_none())
        .map(|r| r.row)
        .collect::<Vec<_>>();

    if nameless.is_empty() {
        tracing::debug!("no nameless rows to reconcile");
        return Ok(records);
    }
    let Ok([first, second]) = <[usize; 2]>::try_from(nameless.as_slice()) else {
        return Err(PreconditionError::UnexpectedNamelessRows { rows: nameless });
    };
    reconcile_nameless_pair(records, first, second)
}

fn reconcile_nameless_pair(
    mut records: Vec<GameRecord>,
    kept_row: usize,
    dropped_row: usize,
) -> Result<Vec<GameRecord>, PreconditionError> {
    let keep_pos = records
        .iter()
        .position(|r| r.row == kept_row)
        .ok_or(PreconditionError::RowNotFound { row: kept_row })?;
    let drop_pos = records
        .iter()
        .position(|r| r.row == dropped_row)
        .ok_or(PreconditionError::RowNotFound { row: dropped_row })?;

    {
        let (survivor, other) = (&records[keep_pos], &records[drop_pos]);
        if survivor.platform != other.platform
            || survivor.year_of_release != other.year_of_release
        {
            return Err(PreconditionError::NamelessRowsDisagree {
                first: kept_row,
                second: dropped_row,
            });
        }
    }

    let other = records.remove(drop_pos);
    // removing a later row leaves the earlier position intact
    let survivor = &mut records[keep_pos];
    survivor.name = Some(UNKNOWN_IDENTITY.to_owned());
    survivor.genre = Some(UNKNOWN_IDENTITY.to_owned());
    for conflict in merge_sales(&mut survivor.sales, &other.sales) {
        tracing::warn!(
            kept_row,
            dropped_row,
            region = %conflict.region,
            kept = conflict.kept,
            discarded = conflict.discarded,
            "nameless rows both report sales in one region, keeping the earlier figure"
        );
    }

    tracing::info!(
        kept_row,
        dropped_row,
        platform = %survivor.platform,
        year = ?survivor.year_of_release,
        "merged nameless rows into a single Unknown release"
    );
    Ok(records)
}

/// A region where both nameless rows carry a non-zero sales figure.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SalesConflict {
    region: Region,
    kept: f64,
    discarded: f64,
}

/// Fills the survivor's zero regions from the donor.
///
/// Returns the regions where both are non-zero; the survivor's figure stays.
fn merge_sales(survivor: &mut RegionalSales, donor: &RegionalSales) -> Vec<SalesConflict> {
    let mut conflicts = Vec::new();
    for region in Region::ALL {
        let target = survivor.get_mut(region);
        let donated = donor.get(region);
        if donated == 0.0 {
            continue;
        }
        if *target == 0.0 {
            *target = donated;
        } else {
            conflicts.push(SalesConflict {
                region,
                kept: *target,
                discarded: donated,
            });
        }
    }
    conflicts
}

/// Keeps the first row of every `(name, platform, year_of_release)` group.
///
/// Rows sharing name and platform but not year are distinct releases and are
/// all kept. The first row wins even if a later duplicate is more complete.
#[must_use]
pub fn resolve_duplicates(mut records: Vec<GameRecord>) -> Vec<GameRecord> {
    let mut seen = HashSet::new();
    records.retain(|record| {
        let first = seen.insert(record.identity_key());
        if !first {
            tracing::warn!(
                row = record.row,
                name = ?record.name,
                platform = %record.platform,
                year = ?record.year_of_release,
                "dropping duplicate release"
            );
        }
        first
    });
    records
}

/// Adds `total_sales` and converts to the cleaned representation.
pub fn derive_total_sales(records: Vec<GameRecord>) -> Result<GameTable, PreconditionError> {
    let games = records
        .into_iter()
        .map(|record| {
            let name = record
                .name
                .ok_or(PreconditionError::MissingName { row: record.row })?;
            let genre = record
                .genre
                .ok_or(PreconditionError::MissingGenre { row: record.row })?;
            let sales = record.sales;
            Ok(Game {
                name,
                platform: record.platform,
                year_of_release: record.year_of_release,
                genre,
                na_sales: sales.na_sales,
                eu_sales: sales.eu_sales,
                jp_sales: sales.jp_sales,
                other_sales: sales.other_sales,
                critic_score: record.critic_score,
                user_score: record.user_score,
                rating: record.rating,
                total_sales: sales.total(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GameTable::new(games))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Platform,Year_of_Release,Genre,NA_sales,EU_sales,JP_sales,Other_sales,Critic_Score,User_Score,Rating";

    fn raw(rows: &[&str]) -> RawTable {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.push('\n');
        RawTable::from_reader(csv.as_bytes()).unwrap()
    }

    fn records(rows: &[&str]) -> Vec<GameRecord> {
        coerce_types(&normalize_headers(raw(rows))).unwrap()
    }

    fn coerce_err(row: &str) -> SchemaError {
        coerce_types(&normalize_headers(raw(&[row]))).unwrap_err()
    }

    #[test]
    fn test_normalize_headers_lowercases_only() {
        let table = normalize_headers(raw(&[]));
        assert_eq!(table.headers(), record::REQUIRED_COLUMNS);
        assert_eq!(normalize_headers(table.clone()), table);
    }

    #[test]
    fn test_missing_column() {
        let table = RawTable::from_reader("name,platform\nFoo,PC\n".as_bytes()).unwrap();
        let err = coerce_types(&normalize_headers(table)).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingColumn {
                column: "year_of_release"
            }
        ));
    }

    #[test]
    fn test_missing_columns_reported_in_schema_order() {
        let table = RawTable::from_reader(
            "name,platform,year_of_release,na_sales,eu_sales\nFoo,PC,2010,1,1\n".as_bytes(),
        )
        .unwrap();
        let err = coerce_types(&normalize_headers(table)).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { column: "genre" }));

        let table = RawTable::from_reader(
            "name,platform,year_of_release,genre,eu_sales,rating\nFoo,PC,2010,Action,1,E\n"
                .as_bytes(),
        )
        .unwrap();
        let err = coerce_types(&normalize_headers(table)).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingColumn { column: "na_sales" }
        ));
    }

    #[test]
    fn test_coerce_row() {
        let recs = records(&["Wii Sports,Wii,2006.0,Sports,41.36,28.96,3.77,8.45,76.0,8,E"]);
        let rec = &recs[0];
        assert_eq!(rec.row, 0);
        assert_eq!(rec.name.as_deref(), Some("Wii Sports"));
        assert_eq!(rec.year_of_release, Some(2006));
        assert_eq!(rec.sales.na_sales, 41.36);
        assert_eq!(rec.sales.other_sales, 8.45);
        assert_eq!(rec.critic_score, Some(76.0));
        assert_eq!(rec.user_score, Some(8.0));
        assert_eq!(rec.rating.as_deref(), Some("E"));
    }

    #[test]
    fn test_missing_values_stay_null() {
        let recs = records(&["Foo,PC,,Puzzle,,,,,,,"]);
        let rec = &recs[0];
        assert_eq!(rec.year_of_release, None);
        assert_eq!(rec.sales, RegionalSales::default());
        assert_eq!(rec.critic_score, None);
        assert_eq!(rec.user_score, None);
        assert_eq!(rec.rating, None);
    }

    #[test]
    fn test_user_score_sentinel_maps_to_null_only() {
        let recs = records(&[
            "A,PC,2010,Action,0,0,0,0,,tbd,",
            "B,PC,2010,Action,0,0,0,0,,7.5,",
            "C,PC,2010,Action,0,0,0,0,,,",
            "D,PC,2010,Action,0,0,0,0,,0,",
        ]);
        let scores = recs.iter().map(|r| r.user_score).collect::<Vec<_>>();
        assert_eq!(scores, [None, Some(7.5), None, Some(0.0)]);
    }

    #[test]
    fn test_other_user_score_text_is_rejected() {
        let err = coerce_err("A,PC,2010,Action,0,0,0,0,,TBA,");
        assert!(matches!(
            err,
            SchemaError::InvalidValue {
                column: "user_score",
                ..
            }
        ));
    }

    #[test]
    fn test_fractional_year_is_rejected() {
        let err = coerce_err("A,PC,2006.5,Action,0,0,0,0,,,");
        assert!(matches!(
            err,
            SchemaError::InvalidValue {
                row: 0,
                column: "year_of_release",
                reason: "not an integer",
                ..
            }
        ));
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        for year in ["1979", "2017", "2017.0"] {
            let err = coerce_err(&format!("A,PC,{year},Action,0,0,0,0,,,"));
            assert!(matches!(
                err,
                SchemaError::InvalidValue {
                    column: "year_of_release",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_negative_sales_are_rejected() {
        let err = coerce_err("A,PC,2010,Action,0,-0.1,0,0,,,");
        assert!(matches!(
            err,
            SchemaError::InvalidValue {
                column: "eu_sales",
                reason: "negative sales",
                ..
            }
        ));
    }

    #[test]
    fn test_scores_out_of_range_are_rejected() {
        assert!(matches!(
            coerce_err("A,PC,2010,Action,0,0,0,0,101,,"),
            SchemaError::InvalidValue {
                column: "critic_score",
                ..
            }
        ));
        assert!(matches!(
            coerce_err("A,PC,2010,Action,0,0,0,0,,10.5,"),
            SchemaError::InvalidValue {
                column: "user_score",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_platform_is_rejected() {
        assert!(matches!(
            coerce_err("A,,2010,Action,0,0,0,0,,,"),
            SchemaError::MissingValue {
                row: 0,
                column: "platform"
            }
        ));
    }

    #[test]
    fn test_repair_merges_nameless_pair() {
        let recs = records(&[
            "Foo,P,2000,Action,1.0,0,0,0,,,",
            ",P,2000,,1.78,0.53,0,0.08,,,",
            "Bar,P,2001,Racing,0.5,0,0,0,,,",
            ",P,2000,,0,0,0.03,0,,,",
        ]);
        let repaired = repair_missing_identity(recs).unwrap();
        assert_eq!(repaired.len(), 3);

        let unknown = repaired
            .iter()
            .find(|r| r.name.as_deref() == Some(UNKNOWN_IDENTITY))
            .unwrap();
        assert_eq!(unknown.row, 1);
        assert_eq!(unknown.genre.as_deref(), Some(UNKNOWN_IDENTITY));
        assert_eq!(unknown.sales.na_sales, 1.78);
        assert_eq!(unknown.sales.eu_sales, 0.53);
        assert_eq!(unknown.sales.jp_sales, 0.03);
        assert_eq!(unknown.sales.other_sales, 0.08);
        assert!(repaired.iter().all(|r| r.row != 3));
        assert_eq!(
            repaired.iter().map(|r| r.row).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn test_repair_is_noop_without_nameless_rows() {
        let recs = records(&["Foo,P,2000,Action,1.0,0,0,0,,,"]);
        assert_eq!(repair_missing_identity(recs.clone()).unwrap(), recs);
    }

    #[test]
    fn test_repair_rejects_single_nameless_row() {
        let recs = records(&["Foo,P,2000,Action,1,0,0,0,,,", ",P,2000,,1,0,0,0,,,"]);
        assert_eq!(
            repair_missing_identity(recs),
            Err(PreconditionError::UnexpectedNamelessRows { rows: vec![1] })
        );
    }

    #[test]
    fn test_repair_rejects_three_nameless_rows() {
        let recs = records(&[
            ",P,2000,,1,0,0,0,,,",
            ",P,2000,,0,0,1,0,,,",
            ",P,2000,,0,1,0,0,,,",
        ]);
        assert_eq!(
            repair_missing_identity(recs),
            Err(PreconditionError::UnexpectedNamelessRows {
                rows: vec![0, 1, 2]
            })
        );
    }

    #[test]
    fn test_repair_rejects_pair_from_different_releases() {
        let recs = records(&[",P,2000,,1,0,0,0,,,", ",P,2001,,0,0,1,0,,,"]);
        assert_eq!(
            repair_missing_identity(recs),
            Err(PreconditionError::NamelessRowsDisagree {
                first: 0,
                second: 1
            })
        );

        let recs = records(&[",P,2000,,1,0,0,0,,,", ",Q,2000,,0,0,1,0,,,"]);
        assert!(matches!(
            repair_missing_identity(recs),
            Err(PreconditionError::NamelessRowsDisagree { .. })
        ));
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let recs = records(&[
            "Foo,X,2005,Action,1.0,0,0,0,,,",
            "Foo,X,2005,Action,2.0,0,0,0,90,,",
            "Foo,X,2005,Action,3.0,0,0,0,,,",
        ]);
        let deduped = resolve_duplicates(recs);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].row, 0);
        assert_eq!(deduped[0].sales.na_sales, 1.0);
        // the more complete duplicate is not merged in
        assert_eq!(deduped[0].critic_score, None);
    }

    #[test]
    fn test_duplicates_with_different_years_are_kept() {
        let recs = records(&[
            "Foo,X,2005,Action,1.0,0,0,0,,,",
            "Foo,X,2010,Action,1.0,0,0,0,,,",
            "Foo,Y,2005,Action,1.0,0,0,0,,,",
        ]);
        assert_eq!(resolve_duplicates(recs).len(), 3);
    }

    #[test]
    fn test_duplicates_with_unknown_year_collapse() {
        let recs = records(&["Foo,X,,Action,1.0,0,0,0,,,", "Foo,X,,Action,1.0,0,0,0,,,"]);
        assert_eq!(resolve_duplicates(recs).len(), 1);
    }

    #[test]
    fn test_total_sales_is_row_sum() {
        let table = clean(raw(&[
            "A,PC,2010,Action,0.1,0.2,0.3,0.4,,,",
            "B,PC,2011,Action,41.36,28.96,3.77,8.45,,,",
        ]))
        .unwrap();
        for game in &table {
            let sum = game.na_sales + game.eu_sales + game.jp_sales + game.other_sales;
            assert!((game.total_sales - sum).abs() < 1e-9);
            assert!(game.total_sales >= 0.0);
        }
    }

    #[test]
    fn test_missing_genre_is_precondition_error() {
        let err = clean(raw(&["A,PC,2010,,0,0,0,0,,,"])).unwrap_err();
        assert!(matches!(
            err,
            CleanError::Precondition(PreconditionError::MissingGenre { row: 0 })
        ));
    }

    #[test]
    fn test_scenario_nameless_pair() {
        let table = clean(raw(&[
            ",P,2000,,1.0,0,0,0,,,",
            ",P,2000,,0.5,0,0.03,0,,,",
        ]))
        .unwrap();
        assert_eq!(table.len(), 1);
        let game = &table.games()[0];
        assert_eq!(game.name, "Unknown");
        assert_eq!(game.genre, "Unknown");
        assert_eq!(game.jp_sales, 0.03);
        assert_eq!(game.na_sales, 1.0);
    }

    #[test]
    fn test_merge_keeps_earlier_figure_on_conflict() {
        let table = clean(raw(&[
            ",GEN,1993,,1.78,0,0,0,,,",
            ",GEN,1993,,0.9,0,0.03,0,,,",
        ]))
        .unwrap();
        let game = &table.games()[0];
        assert_eq!(game.na_sales, 1.78);
        assert_eq!(game.jp_sales, 0.03);
        assert!((game.total_sales - 1.81).abs() < 1e-9);
    }

    #[test]
    fn test_merge_sales_reports_conflicts() {
        let mut survivor = RegionalSales {
            na_sales: 1.78,
            eu_sales: 0.5,
            ..RegionalSales::default()
        };
        let donor = RegionalSales {
            na_sales: 0.9,
            jp_sales: 0.03,
            ..RegionalSales::default()
        };
        let conflicts = merge_sales(&mut survivor, &donor);
        assert_eq!(
            conflicts,
            [SalesConflict {
                region: Region::Na,
                kept: 1.78,
                discarded: 0.9,
            }]
        );
        assert_eq!(survivor.na_sales, 1.78);
        assert_eq!(survivor.eu_sales, 0.5);
        assert_eq!(survivor.jp_sales, 0.03);

        let mut empty = RegionalSales::default();
        assert!(merge_sales(&mut empty, &donor).is_empty());
        assert_eq!(empty, donor);
    }

    #[test]
    fn test_scenario_triple_duplicate() {
        let table = clean(raw(&[
            "Foo,X,2005,Action,1.0,0,0,0,,,",
            "Foo,X,2005,Action,2.0,0,0,0,,,",
            "Foo,X,2005,Action,3.0,0,0,0,,,",
        ]))
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.games()[0].na_sales, 1.0);
    }

    #[test]
    fn test_scenario_re_release() {
        let table = clean(raw(&[
            "Foo,X,2005,Action,1.0,0,0,0,,,",
            "Foo,X,2010,Action,1.0,0,0,0,,,",
        ]))
        .unwrap();
        let years = table
            .iter()
            .map(|g| g.year_of_release)
            .collect::<Vec<_>>();
        assert_eq!(years, [Some(2005), Some(2010)]);
    }

    #[test]
    fn test_cleaned_invariants() {
        let table = clean(raw(&[
            "Foo,X,2005.0,Action,1.0,0,0,0,80,tbd,T",
            ",GEN,1993,,1.78,0.53,0,0.08,,,",
            "Foo,X,2005.0,Action,1.0,0,0,0,80,tbd,T",
            "Bar,X,,Sports,0,0,0.2,0,,8.1,",
            ",GEN,1993,,0,0,0.03,0,,,",
            "Foo,X,2010.0,Action,0.4,0,0,0,,,",
        ]))
        .unwrap();
        assert_eq!(table.len(), 4);

        let mut keys = HashSet::new();
        for game in &table {
            assert!(!game.name.is_empty());
            assert!(!game.genre.is_empty());
            assert!(keys.insert((&game.name, &game.platform, game.year_of_release)));
            if let Some(year) = game.year_of_release {
                assert!((MIN_YEAR..=MAX_YEAR).contains(&year));
            }
        }
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let first = clean(raw(&[
            "Foo,X,2005.0,Action,1.0,0.31,0,0.07,80,tbd,T",
            ",GEN,1993,,1.78,0.53,0,0.08,,,",
            "Foo,X,2005.0,Action,1.0,0,0,0,80,tbd,T",
            "\"Bar, the Game\",X,,Sports,0,0,0.2,0,,8.1,",
            ",GEN,1993,,0,0,0.03,0,,,",
            "Foo,X,2010.0,Action,0.4,0,0,0,,,",
        ]))
        .unwrap();

        let mut written = Vec::new();
        first.write_csv(&mut written).unwrap();
        let second = clean(RawTable::from_reader(written.as_slice()).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
