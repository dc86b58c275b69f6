use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append `key=value` pairs to the GitHub Actions output file. When the file
/// is absent or unwritable, falls back to the legacy `::set-output` workflow
/// command on stdout so the step still publishes its outputs.
pub fn write_outputs(output_path: Option<&Path>, pairs: &[(&str, String)]) {
    if let Some(path) = output_path {
        match append_pairs(path, pairs) {
            Ok(()) => return,
            Err(e) => {
                log::warn!("⚠️ Could not write to {}: {}. Falling back to ::set-output", path.display(), e);
            }
        }
    }

    for (key, value) in pairs {
        println!("::set-output name={}::{}", key, value);
    }
}

fn append_pairs(path: &Path, pairs: &[(&str, String)]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (key, value) in pairs {
        writeln!(file, "{}={}", key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_key_value_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");

        write_outputs(Some(&path), &[("threat-count", "3".to_string())]);
        write_outputs(
            Some(&path),
            &[("report-url", "https://github.com/o/r/pull/1#issuecomment-9".to_string())],
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "threat-count=3\nreport-url=https://github.com/o/r/pull/1#issuecomment-9\n"
        );
    }
}
