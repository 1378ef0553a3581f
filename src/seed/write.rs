// src/seed/write.rs

use csv::{ReaderBuilder, Writer};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::{Result, SeedError};
use crate::seed::record::RowRecord;
use crate::seed::schema::{OutputSchema, ID_COLUMN, ROLE_COLUMN};

/// `SEED-00001`, `SEED-00002`, ... per output file.
pub fn seed_id(ordinal: usize) -> String {
    format!("SEED-{:05}", ordinal)
}

/// Write `rows` to `path` in `schema` order and confirm the file on disk has
/// one header plus one record per row, each exactly `schema.len()` wide.
///
/// The file is written beside the target under a hidden name and renamed into
/// place, so a failed run never leaves a truncated CSV at `path`.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(path = %path.display(), role = %role, rows = rows.len())
)]
pub fn write_seed_csv(
    path: &Path,
    role: &str,
    rows: &[RowRecord],
    schema: &OutputSchema,
) -> Result<usize> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| SeedError::io(&dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "seed.csv".to_string());
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let written = write_rows(&tmp_path, role, rows, schema)
        .and_then(|n| {
            fs::rename(&tmp_path, path).map_err(|e| SeedError::io(path, e))?;
            Ok(n)
        })
        .map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            e
        })?;

    if let Err(e) = verify_output(path, written, schema.len()) {
        let _ = fs::remove_file(path);
        return Err(e);
    }

    info!(rows = written, columns = schema.len(), "seed csv written");
    Ok(written)
}

fn write_rows(path: &Path, role: &str, rows: &[RowRecord], schema: &OutputSchema) -> Result<usize> {
    let mut wtr = Writer::from_path(path).map_err(|e| SeedError::csv(path, e))?;
    wtr.write_record(schema.columns())
        .map_err(|e| SeedError::csv(path, e))?;

    for (idx, row) in rows.iter().enumerate() {
        let id = seed_id(idx + 1);
        let record = schema.columns().iter().map(|col| match col.as_str() {
            ID_COLUMN => id.as_str(),
            ROLE_COLUMN => role,
            other => row.get(other),
        });
        wtr.write_record(record)
            .map_err(|e| SeedError::csv(path, e))?;
    }

    wtr.flush().map_err(|e| SeedError::io(path, e))?;
    debug!(rows = rows.len(), "flushed");
    Ok(rows.len())
}

/// Re-read `path` and check its shape.
pub fn verify_output(path: &Path, rows: usize, width: usize) -> Result<()> {
    let fail = |reason: String| SeedError::Verify {
        path: path.to_path_buf(),
        reason,
    };
    if !path.is_file() {
        return Err(fail("file does not exist after write".into()));
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SeedError::csv(path, e))?;

    let mut count = 0usize;
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| SeedError::csv(path, e))?;
        if rec.len() != width {
            return Err(fail(format!(
                "record {} has {} fields, expected {}",
                idx,
                rec.len(),
                width
            )));
        }
        count += 1;
    }
    if count != rows + 1 {
        return Err(fail(format!(
            "found {} records, expected {} (header + {} rows)",
            count,
            rows + 1,
            rows
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::schema::{assemble_schema, PREFERRED_COLUMNS};
    use csv::Reader;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn rec(pairs: &[(&str, &str)]) -> RowRecord {
        pairs.iter().copied().collect()
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<BTreeMap<String, String>>) {
        let mut rdr = Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows = rdr
            .deserialize::<BTreeMap<String, String>>()
            .map(|r| r.unwrap())
            .collect();
        (headers, rows)
    }

    #[test]
    fn ids_are_one_based_and_padded() {
        assert_eq!(seed_id(1), "SEED-00001");
        assert_eq!(seed_id(120), "SEED-00120");
    }

    #[test]
    fn writes_every_schema_column_for_every_row() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/out/infra_seed.csv");
        let rows = vec![
            rec(&[("label", "AI Infrastructure"), ("type", "lab"), ("source_id", "L-1"), ("team", "x")]),
            rec(&[("label", "AI Infrastructure"), ("type", "person"), ("source_id", "P-1")]),
        ];
        let schema = assemble_schema(&PREFERRED_COLUMNS, &["label", "type", "source_id", "team"]);

        let n = write_seed_csv(&path, "Infra Eng", &rows, &schema).unwrap();
        assert_eq!(n, 2);

        let (headers, back) = read_back(&path);
        assert_eq!(headers, schema.columns());
        assert_eq!(back.len(), 2);
        assert_eq!(back[0]["seed_id"], "SEED-00001");
        assert_eq!(back[1]["seed_id"], "SEED-00002");
        assert_eq!(back[1]["role"], "Infra Eng");
        assert_eq!(back[0]["team"], "x");
        assert_eq!(back[1]["team"], "");
        assert_eq!(back[1]["url"], "");

        // no temp file left behind
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn values_survive_a_round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("rt.csv");
        let rows = vec![rec(&[
            ("label", "Applied AI"),
            ("type", "lab"),
            ("source_id", "L-1"),
            ("name", "Acme, Inc."),
            ("notes", "line one\nline \"two\""),
        ])];
        let schema = assemble_schema(&PREFERRED_COLUMNS, &["label", "type", "source_id", "name", "notes"]);
        write_seed_csv(&path, "r", &rows, &schema).unwrap();

        let (_, back) = read_back(&path);
        for col in ["label", "type", "source_id", "name", "notes"] {
            assert_eq!(back[0][col], rows[0].get(col), "column {col}");
        }
    }

    #[test]
    fn verification_rejects_wrong_shapes() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("bad.csv");
        fs::write(&path, "a,b,c\n1,2,3\n1,2\n").unwrap();
        assert!(matches!(
            verify_output(&path, 2, 3),
            Err(SeedError::Verify { .. })
        ));
        fs::write(&path, "a,b,c\n1,2,3\n").unwrap();
        assert!(verify_output(&path, 1, 3).is_ok());
        assert!(verify_output(&path, 2, 3).is_err());
        assert!(verify_output(&tmp.path().join("missing.csv"), 0, 3).is_err());
    }

    #[test]
    fn unwritable_destination_fails_without_output() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("out.csv");
        let rows = vec![rec(&[("label", "a"), ("type", "b"), ("source_id", "c")])];
        let schema = assemble_schema(&PREFERRED_COLUMNS, &["label"]);

        let err = write_seed_csv(&path, "r", &rows, &schema).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
        assert!(!path.exists());
    }
}
