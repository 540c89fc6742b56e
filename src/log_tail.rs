// Last N lines of a system log, read backwards in blocks

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub const BLOCK_SIZE: u64 = 4096;

/// Reads the last `n` lines of `path` without loading the whole file.
///
/// Blocks are read from the end towards the start until more than `n` newlines have been
/// collected or the start of the file is reached. Invalid UTF-8 is replaced, never fatal.
pub fn tail_lines(path: &Path, n: usize) -> std::io::Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut file = File::open(path)?;
    let mut pos = file.seek(SeekFrom::End(0))?;
    let mut buf: Vec<u8> = Vec::new();
    let mut newlines = 0usize;

    while pos > 0 && newlines <= n {
        let len = BLOCK_SIZE.min(pos);
        pos -= len;
        file.seek(SeekFrom::Start(pos))?;
        let mut block = vec![0u8; len as usize];
        file.read_exact(&mut block)?;
        newlines += block.iter().filter(|&&b| b == b'\n').count();
        block.extend_from_slice(&buf);
        buf = block;
    }

    let text = String::from_utf8_lossy(&buf);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    Ok(lines[start..].iter().map(|l| l.to_string()).collect())
}

/// Tails the first candidate that exists. Missing files and read errors give an empty list.
pub fn tail_first_existing(candidates: &[PathBuf], n: usize) -> Vec<String> {
    let Some(path) = candidates.iter().find(|p| p.is_file()) else {
        tracing::debug!("no log file found among {} candidates", candidates.len());
        return Vec::new();
    };
    match tail_lines(path, n) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                operation = "tail_log",
                "log read failed"
            );
            Vec::new()
        }
    }
}
