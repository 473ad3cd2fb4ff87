//! Integration tests for serialized writes from many threads.
//!
//! Every line must arrive whole, exactly once, with a single terminator, and
//! lines from one thread must keep their relative order.

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use logging_sink::Logger;
use test_support::{ScratchDir, SharedBuffer, read_lines};

const THREADS: usize = 12;
const LINES_PER_THREAD: usize = 250;

fn payload(thread: usize, seq: usize) -> String {
    // Long enough that a torn write would be visible.
    format!("thread={thread:02} seq={seq:04} {}", "x".repeat(96))
}

fn hammer(logger: &Arc<Logger>) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|thread| {
            let logger = Arc::clone(logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for seq in 0..LINES_PER_THREAD {
                    logger.log(&payload(thread, seq));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
}

fn assert_complete_and_ordered(lines: &[String]) {
    assert_eq!(lines.len(), THREADS * LINES_PER_THREAD);

    let mut next_seq: HashMap<usize, usize> = HashMap::new();
    for line in lines {
        let mut fields = line.split_whitespace();
        let thread: usize = fields
            .next()
            .and_then(|field| field.strip_prefix("thread="))
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| panic!("malformed line: {line:?}"));
        let seq: usize = fields
            .next()
            .and_then(|field| field.strip_prefix("seq="))
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| panic!("malformed line: {line:?}"));

        assert_eq!(*line, payload(thread, seq), "line was torn or merged");

        let expected = next_seq.entry(thread).or_insert(0);
        assert_eq!(seq, *expected, "thread {thread} lines out of order");
        *expected += 1;
    }

    assert_eq!(next_seq.len(), THREADS);
}

#[test]
fn concurrent_file_writes_keep_every_line_whole() {
    let scratch = ScratchDir::new();
    let path = scratch.join("concurrent.log");
    let logger = Arc::new(Logger::with_stderr(SharedBuffer::new()));
    logger.set_out_file(&path);

    hammer(&logger);

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with('\n'));
    assert!(!raw.contains("\n\n"), "no line carries an extra terminator");
    assert_complete_and_ordered(&read_lines(&path));
}

#[test]
fn concurrent_stderr_writes_keep_every_line_whole() {
    let stderr = SharedBuffer::new();
    let logger = Arc::new(Logger::with_stderr(stderr.clone()));

    hammer(&logger);

    assert_complete_and_ordered(&stderr.lines());
}

#[test]
fn appends_to_existing_file() {
    let scratch = ScratchDir::new();
    let path = scratch.join("existing.log");
    fs::write(&path, "previous run\n").unwrap();

    let logger = Logger::with_stderr(SharedBuffer::new());
    logger.set_out_file(&path);
    logger.log("this run");

    assert_eq!(read_lines(&path), vec!["previous run", "this run"]);
}
