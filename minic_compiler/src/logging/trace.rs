//! Per-compilation trace narration

/// Append-only narration of what the compiler did, read once at the end
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    buffer: String,
    lines: usize,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line
    pub fn log(&mut self, line: impl AsRef<str>) {
        self.buffer.push_str(line.as_ref());
        self.buffer.push('\n');
        self.lines += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_accumulate_in_order() {
        let mut trace = TraceLog::new();
        trace.log("first");
        trace.log(format!("second {}", 2));
        assert_eq!(trace.as_str(), "first\nsecond 2\n");
        assert_eq!(trace.line_count(), 2);
    }

    #[test]
    fn test_empty_trace() {
        let trace = TraceLog::new();
        assert_eq!(trace.as_str(), "");
        assert_eq!(trace.into_string(), String::new());
    }
}
