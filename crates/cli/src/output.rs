//! Point tables on disk: CSV and Parquet through polars, JSON through serde_json.
//!
//! Every format carries the same two columns, `x` and `y`, one row per point.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{bail, Context, Result};
use arcspace::PointSequence;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Parquet,
    Json,
}

impl Format {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Format::Csv),
            Some("parquet") => Ok(Format::Parquet),
            Some("json") => Ok(Format::Json),
            _ => bail!(
                "unsupported extension for {} (expected .csv, .parquet or .json)",
                path.display()
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PointRow {
    x: f64,
    y: f64,
}

/// Write `seq` to `path`, creating parent directories as needed.
pub fn write_points(path: &Path, seq: &PointSequence) -> Result<Format> {
    let format = Format::from_path(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    match format {
        Format::Csv | Format::Parquet => {
            let mut df = df!("x" => seq.xs(), "y" => seq.ys())?;
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            if format == Format::Csv {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)?;
            } else {
                ParquetWriter::new(file).finish(&mut df)?;
            }
        }
        Format::Json => {
            let rows: Vec<PointRow> = seq.iter().map(|p| PointRow { x: p.x, y: p.y }).collect();
            fs::write(path, serde_json::to_vec_pretty(&rows)?)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(format)
}

/// Read back a point table written by `write_points` (or any table with `x`/`y` columns).
pub fn read_points(path: &Path) -> Result<Vec<(f64, f64)>> {
    let lf = match Format::from_path(path)? {
        Format::Csv => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("scanning {}", path.display()))?,
        Format::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .with_context(|| format!("scanning {}", path.display()))?,
        Format::Json => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let rows: Vec<PointRow> = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?;
            return Ok(rows.into_iter().map(|r| (r.x, r.y)).collect());
        }
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns of {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut points = Vec::with_capacity(df.height());
    for (x, y) in xs.into_iter().zip(ys.into_iter()) {
        match (x, y) {
            (Some(x), Some(y)) => points.push((x, y)),
            _ => bail!("null coordinate in {}", path.display()),
        }
    }
    Ok(points)
}

/// Summary of consecutive chord lengths; equal spacing shows as `rel_spread` near zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChordStats {
    pub points: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// `(max - min) / mean`
    pub rel_spread: f64,
}

/// `None` for fewer than two points.
pub fn chord_stats(points: &[(f64, f64)]) -> Option<ChordStats> {
    if points.len() < 2 {
        return None;
    }
    let chords: Vec<f64> = points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .collect();
    let min = chords.iter().copied().fold(f64::INFINITY, f64::min);
    let max = chords.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = chords.iter().sum::<f64>() / chords.len() as f64;
    Some(ChordStats {
        points: points.len(),
        min,
        max,
        mean,
        rel_spread: if mean > 0.0 { (max - min) / mean } else { 0.0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcspace::{resample, PrecisionCfg};
    use tempfile::tempdir;

    fn line() -> PointSequence {
        resample(|x| x, 0.0, 4.0, 5, &PrecisionCfg::default()).unwrap()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.CSV")).unwrap(), Format::Csv);
        assert_eq!(
            Format::from_path(Path::new("b.parquet")).unwrap(),
            Format::Parquet
        );
        assert_eq!(Format::from_path(Path::new("b.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("b.txt")).is_err());
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn every_format_reads_back() {
        let dir = tempdir().unwrap();
        let seq = line();
        for name in ["pts.csv", "pts.parquet", "nested/pts.json"] {
            let path = dir.path().join(name);
            write_points(&path, &seq).unwrap();
            let back = read_points(&path).unwrap();
            assert_eq!(back.len(), seq.len(), "{name}");
            for ((x, y), p) in back.iter().zip(seq.iter()) {
                assert!((x - p.x).abs() < 1e-9 && (y - p.y).abs() < 1e-9, "{name}");
            }
        }
    }

    #[test]
    fn csv_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.csv");
        write_points(&path, &line()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("x,y"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn chord_stats_on_square_corners() {
        let pts = [(0.0, 0.0), (3.0, 4.0), (3.0, 5.0)];
        let s = chord_stats(&pts).unwrap();
        assert_eq!(s.points, 3);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.mean, 3.0);
        assert!((s.rel_spread - 4.0 / 3.0).abs() < 1e-12);
        assert!(chord_stats(&pts[..1]).is_none());
    }

    #[test]
    fn resampled_line_has_flat_chords() {
        let seq = line();
        let s = chord_stats(&seq.clone().into_pairs()).unwrap();
        assert!(s.rel_spread < 1e-4, "{s:?}");
    }
}
