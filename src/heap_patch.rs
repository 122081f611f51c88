//! Finds a string in the heap of a running process and overwrites it in
//! place, using `/proc/<pid>/maps` to locate the heap and `/proc/<pid>/mem`
//! to read and write it. Needs ptrace-level access to the target (same
//! user, or root).

use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapRegion {
    pub start: u64,
    pub end: u64,
}

/// Scans a maps file for the `[heap]` mapping and parses its address range.
///
/// # Errors
///
/// Fails if no `[heap]` mapping exists or its entry is malformed.
pub fn find_heap_region(maps: impl BufRead) -> Result<HeapRegion> {
    for line in maps.lines() {
        let line = line?;
        if line.contains("[heap]") {
            return parse_range(&line);
        }
    }

    bail!("no [heap] mapping found")
}

fn parse_range(line: &str) -> Result<HeapRegion> {
    let range = line.split_whitespace().next().unwrap_or_default();
    let (start, end) = range
        .split_once('-')
        .with_context(|| format!("malformed maps entry: {line}"))?;

    Ok(HeapRegion {
        start: u64::from_str_radix(start, 16)?,
        end: u64::from_str_radix(end, 16)?,
    })
}

/// Replaces the first occurrence of `search` in the heap of process `pid`
/// with `replace`. The replacement happens in place, so both strings must
/// have the same length. A heap that does not contain `search` is reported
/// but is not an error.
///
/// # Errors
///
/// Fails on unequal lengths, an empty search string, a missing process or
/// heap mapping, or insufficient permissions on `/proc/<pid>/mem`.
pub fn patch(pid: u32, search: &[u8], replace: &[u8]) -> Result<()> {
    if search.is_empty() {
        bail!("search string must not be empty");
    }
    if search.len() != replace.len() {
        bail!("search and replace strings must have the same length");
    }

    let maps = File::open(format!("/proc/{pid}/maps"))
        .with_context(|| format!("unable to read memory maps of process {pid}"))?;
    let region = find_heap_region(BufReader::new(maps))?;

    let mut mem = OpenOptions::new()
        .read(true)
        .write(true)
        .open(format!("/proc/{pid}/mem"))
        .with_context(|| format!("unable to open memory of process {pid}"))?;

    let len = usize::try_from(region.end - region.start)?;
    let mut heap = vec![0_u8; len];
    mem.seek(SeekFrom::Start(region.start))?;
    mem.read_exact(&mut heap)
        .context("short read from process heap")?;

    let Some(offset) = find_subslice(&heap, search) else {
        println!("String not found in heap");
        return Ok(());
    };

    let address = region.start + u64::try_from(offset)?;
    println!("Found '{}' at {address:#x}", String::from_utf8_lossy(search));

    mem.seek(SeekFrom::Start(address))?;
    mem.write_all(replace)
        .context("unable to write to process heap")?;
    println!("Replaced with '{}'", String::from_utf8_lossy(replace));

    Ok(())
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
