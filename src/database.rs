// src/database.rs

use crate::constants::{
    CSV_COLUMNS, DATE_ONLY_FORMAT, TIER_MAX, TIMESTAMP_FORMAT, TIMESTAMP_PARSE_FORMATS,
};
use crate::error::{Result, TrainerError};
use crate::models::{CsvProblem, Difficulty, Problem, ProblemList};
use crate::repository::ProblemStore;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Loads the problem store from a CSV file. Any malformed row fails the whole load.
pub fn load_store(path: &Path) -> Result<ProblemStore> {
    if !path.exists() {
        return Err(TrainerError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    info!("Loading problems from {:?}", path);
    let file = fs::File::open(path)?;
    read_store(file)
}

pub fn read_store<R: Read>(reader: R) -> Result<ProblemStore> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // serde would quietly default a missing optional column, so check the header up front.
    let headers = reader.headers()?.clone();
    for column in CSV_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TrainerError::invalid_record(
                0,
                format!("missing column '{}'", column),
            ));
        }
    }

    let mut problems = Vec::new();
    for (idx, row) in reader.deserialize::<CsvProblem>().enumerate() {
        // Row numbers are 1-based data rows, matching what a spreadsheet shows below the header.
        let row_no = idx + 1;
        problems.push(parse_row(row_no, row?)?);
    }

    let store = ProblemStore::from_problems(problems).map_err(|number| {
        TrainerError::invalid_record(0, format!("duplicate problem number {}", number))
    })?;
    debug!("[DB] Loaded {} problems", store.len());
    Ok(store)
}

fn parse_row(row_no: usize, raw: CsvProblem) -> Result<Problem> {
    if raw.number == 0 {
        return Err(TrainerError::invalid_record(row_no, "Number must be positive"));
    }
    if raw.completed > TIER_MAX {
        return Err(TrainerError::invalid_record(
            row_no,
            format!("Completed must be in 0..={}, got {}", TIER_MAX, raw.completed),
        ));
    }
    let difficulty =
        Difficulty::from_str(&raw.difficulty).map_err(|e| TrainerError::invalid_record(row_no, e))?;
    let list =
        ProblemList::from_str(&raw.list).map_err(|e| TrainerError::invalid_record(row_no, e))?;
    let date_completed = match raw.date_completed.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            parse_timestamp(s)
                .ok_or_else(|| TrainerError::invalid_record(row_no, format!("bad timestamp '{}'", s)))?,
        ),
    };

    if (raw.completed == 0) != date_completed.is_none() {
        warn!(
            "[DB] Problem {} has Completed={} but Date Completed={:?}",
            raw.number, raw.completed, date_completed
        );
    }

    Ok(Problem {
        number: raw.number,
        name: raw.name,
        difficulty,
        link: raw.link,
        list,
        completion_status: raw.completed,
        date_completed,
    })
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_PARSE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_ONLY_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Writes the store back in its original row order, via a temp file and rename.
pub fn save_store(path: &Path, store: &ProblemStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = path.with_extension("csv.tmp");
    {
        let file = fs::File::create(&tmp_path)?;
        write_store(file, store)?;
    }
    fs::rename(&tmp_path, path)?;
    info!("Saved {} problems to {:?}", store.len(), path);
    Ok(())
}

pub fn write_store<W: Write>(writer: W, store: &ProblemStore) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for p in store.iter() {
        writer.serialize(CsvProblem {
            number: p.number,
            name: p.name.clone(),
            difficulty: p.difficulty.as_str().to_string(),
            link: p.link.clone(),
            list: p.list.as_str().to_string(),
            date_completed: p.date_completed.as_ref().map(format_timestamp),
            completed: p.completion_status,
        })?;
    }
    writer.flush()?;
    Ok(())
}
