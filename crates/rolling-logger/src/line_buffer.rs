//! Circular buffer of the most recent log lines

use std::collections::VecDeque;

pub(crate) struct LineBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    /// Bytes of a line whose newline has not arrived yet
    partial: String,
}

impl LineBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            partial: String::new(),
        }
    }

    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(bytes));

        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.push_line(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}
