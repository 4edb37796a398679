use anyhow::{bail, Result};
use coinflip_utils::histogram::Histogram;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read one float per line. Blank lines and `#` comments are skipped.
pub fn load_samples(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Could not open samples file: {} ({})", path.display(), e))?;
    let reader = BufReader::new(file);
    let mut samples = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let value = line.split('#').next().unwrap_or("").trim();
        if value.is_empty() {
            continue;
        }
        match value.parse::<f64>() {
            Ok(sample) => samples.push(sample),
            Err(_) => bail!("Line {}: invalid sample {}", line_number + 1, value),
        }
    }
    Ok(samples)
}

pub fn write_histogram(path: &Path, histogram: &Histogram, overlay: &[f64]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    writer.write_record(&["lower", "upper", "count", "density", "exact_density"])?;
    for (bin, exact) in histogram.bins.iter().zip(overlay.iter()) {
        writer.write_record(&[
            format!("{:.6}", bin.lower),
            format!("{:.6}", bin.upper),
            bin.count.to_string(),
            format!("{:.6}", bin.density),
            format!("{:.6}", exact),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinflip_utils::beta::BetaParameters;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_load_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.25\n\n# header comment\n0.5  \n0.75 # last").unwrap();
        let samples = load_samples(file.path()).unwrap();
        assert_eq!(samples, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_load_samples_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.25\nabc").unwrap();
        let err = load_samples(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Line 2: invalid sample abc");
        assert!(load_samples(Path::new("/nonexistent/samples.txt")).is_err());
    }

    #[test]
    fn test_write_histogram() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histogram.tsv");
        let histogram = Histogram::from_samples(&[0.1, 0.6, 0.7], 2).unwrap();
        let overlay = histogram.overlay(&BetaParameters::uniform()).unwrap();
        write_histogram(&path, &histogram, &overlay).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "lower\tupper\tcount\tdensity\texact_density");
        assert_eq!(lines[2], "0.500000\t1.000000\t2\t1.333333\t1.000000");
    }
}
