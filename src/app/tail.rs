// LogTail - app/tail.rs
//
// Bounded, resumable tail of a single log file.
//
// Each call performs exactly one bounded read and returns; there is no
// background thread and no poll loop here. Callers that want to follow a
// file call `tail` again with the same cursor.
//
// Read window:
//   - Resuming (offset > 0): read from the stored offset, which is always the
//     position right after a newline or a previous EOF.
//   - Cold/reset (offset == 0): start at `len - size_cap` (clamped to 0) and
//     walk backward to the preceding newline so the first line returned is
//     never partial. With no newline in reach the read starts at 0, so the
//     window may exceed the cap.
//
// Failure policy:
//   - Any I/O error (open, stat, seek, read) resets the cursor to offset 0
//     and returns an empty result. The error is logged at WARN and counted on
//     the cursor; it is never returned to the caller.
//   - A file that shrank below the stored offset reads as "nothing new" until
//     it grows past the offset again.
//
// Encoding: lines are split on '\n', a trailing '\r' is dropped, and bytes
// are decoded as lossy UTF-8. A final line without a terminator is returned
// as-is and the offset moves to EOF.

use crate::core::model::{TailCursor, TailMode, TailResult};
use crate::util::constants::{BACKSCAN_BLOCK_SIZE, READ_BUFFER_SIZE};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

/// Tail the file named by `cursor`, advancing the cursor past what was read.
///
/// `reset` discards the stored offset and performs a cold read of the
/// trailing `size_cap` window.
pub fn tail(cursor: &mut TailCursor, mode: TailMode<'_>, reset: bool) -> TailResult {
    let opened = File::open(cursor.path()).and_then(|file| {
        let length = file.metadata()?.len();
        Ok((file, length))
    });

    match opened {
        Ok((mut file, length)) => tail_reader(&mut file, length, cursor, mode, reset),
        Err(e) => fail(cursor, &e, "open"),
    }
}

/// Same as [`tail`], reading from an already-open source of known `length`.
///
/// `reader` may be positioned anywhere; it is sought before every read.
pub fn tail_reader<R: Read + Seek>(
    reader: &mut R,
    length: u64,
    cursor: &mut TailCursor,
    mode: TailMode<'_>,
    reset: bool,
) -> TailResult {
    let position = if reset { 0 } else { cursor.offset() };

    if length <= position {
        cursor.set_offset(position);
        return TailResult::unchanged(position);
    }

    match scan(reader, length, position, cursor.size_cap(), mode) {
        Ok(result) => {
            tracing::debug!(
                file = %cursor.path().display(),
                from = position,
                to = result.new_offset,
                lines = result.lines.len(),
                counted = result.counts.total,
                "Tail: read complete"
            );
            cursor.set_offset(result.new_offset);
            result
        }
        Err(e) => fail(cursor, &e, "read"),
    }
}

fn fail(cursor: &mut TailCursor, error: &io::Error, operation: &'static str) -> TailResult {
    cursor.record_failure();
    tracing::warn!(
        file = %cursor.path().display(),
        operation,
        error = %error,
        failures = cursor.failures(),
        "Tail: I/O error, offset reset to 0"
    );
    TailResult::unchanged(0)
}

/// Read every line from the true read start to EOF.
fn scan<R: Read + Seek>(
    reader: &mut R,
    length: u64,
    position: u64,
    size_cap: u64,
    mode: TailMode<'_>,
) -> io::Result<TailResult> {
    let start = if position > 0 {
        position
    } else {
        line_start_at_or_before(reader, length.saturating_sub(size_cap))?
    };

    reader.seek(SeekFrom::Start(start))?;
    let mut lines = BufReader::with_capacity(READ_BUFFER_SIZE, reader);
    let mut buf = Vec::new();
    let mut offset = start;
    let mut result = TailResult::default();

    loop {
        buf.clear();
        let n = lines.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        offset += n as u64;

        let line = decode_line(&buf);
        match mode {
            TailMode::Dump => result.lines.push(line.into_owned()),
            TailMode::Summarize(patterns) => patterns.classify(&line, &mut result.counts),
        }
    }

    result.new_offset = offset;
    Ok(result)
}

/// Position just after the last newline strictly before `pos`, or 0.
///
/// Walks backward in `BACKSCAN_BLOCK_SIZE` blocks; the result is the same as
/// stepping back one byte at a time.
fn line_start_at_or_before<R: Read + Seek>(reader: &mut R, pos: u64) -> io::Result<u64> {
    let mut block = vec![0u8; BACKSCAN_BLOCK_SIZE];
    let mut end = pos;

    while end > 0 {
        let len = end.min(BACKSCAN_BLOCK_SIZE as u64) as usize;
        let begin = end - len as u64;
        reader.seek(SeekFrom::Start(begin))?;
        reader.read_exact(&mut block[..len])?;
        if let Some(i) = block[..len].iter().rposition(|&b| b == b'\n') {
            return Ok(begin + i as u64 + 1);
        }
        end = begin;
    }

    Ok(0)
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
