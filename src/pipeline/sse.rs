//! Incremental server-sent-events framing.
//!
//! Bytes arrive in arbitrary pieces: a frame, a line or even a UTF-8 sequence may be split
//! across reads. The decoder splits complete lines as they arrive (`\n`, `\r\n` or a bare
//! `\r`) and dispatches a frame on every blank line. Each byte is scanned once, so a
//! large frame delivered in many small reads decodes in linear time.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Value of the `event:` field, if present.
    pub event: Option<String>,
    /// `data:` lines joined with `\n`.
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes of the current, unterminated line.
    line: Vec<u8>,
    /// Offset in `line` up to which no terminator exists.
    scanned: usize,
    event: Option<String>,
    data: Vec<String>,
    /// Bytes consumed into the frame being built.
    frame_len: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes received but not yet part of a complete frame.
    pub fn pending(&self) -> usize {
        self.frame_len + self.line.len()
    }

    /// Appends `bytes` and returns every frame completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseFrame> {
        self.line.extend_from_slice(bytes);

        let mut frames = Vec::new();
        let mut start = 0;
        let mut resume = None;

        while let Some(offset) = self.line[self.scanned..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            let end = self.scanned + offset;
            let terminator_len = match (self.line[end], self.line.get(end + 1).copied()) {
                (b'\r', Some(b'\n')) => 2,
                // A trailing `\r` may be the first half of `\r\n`.
                (b'\r', None) => {
                    resume = Some(end);
                    break;
                }
                _ => 1,
            };

            let line = String::from_utf8_lossy(&self.line[start..end]).into_owned();
            self.frame_len += end + terminator_len - start;
            if let Some(frame) = self.process_line(&line) {
                frames.push(frame);
            }

            start = end + terminator_len;
            self.scanned = start;
        }

        self.line.drain(..start);
        self.scanned = match resume {
            Some(end) => end - start,
            None => self.line.len(),
        };
        frames
    }

    /// Flushes a trailing frame that was not closed by a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        let mut frame = None;
        if !self.line.is_empty() {
            let raw = std::mem::take(&mut self.line);
            let text = String::from_utf8_lossy(&raw);
            for line in text.split(['\r', '\n']) {
                if let Some(done) = self.process_line(line) {
                    frame = Some(done);
                }
            }
        }
        self.scanned = 0;
        frame.or_else(|| self.dispatch())
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            _ => {}
        }
        None
    }

    /// Ends the current frame. Frames without `data:` lines are dropped.
    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let data = std::mem::take(&mut self.data);
        self.frame_len = 0;

        if data.is_empty() {
            return None;
        }
        Some(SseFrame {
            event,
            data: data.join("\n"),
        })
    }
}
