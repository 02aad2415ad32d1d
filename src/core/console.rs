use crate::domain::ports::Terminal;
use crate::utils::error::Result;
use crossterm::{cursor::MoveTo, terminal::Clear, terminal::ClearType};
use std::io::{BufRead, Write};

/// `Terminal` over any reader/writer pair. Stdin/stdout in the binary, in-memory buffers in tests.
pub struct Console<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    clear_enabled: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W, clear_enabled: bool) -> Self {
        Self {
            reader,
            writer,
            clear_enabled,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buffer = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buffer)?;
        if read == 0 {
            return Ok(None);
        }

        // 非 UTF-8 的輸入交給選單判定為無效輸入
        let mut line = String::from_utf8_lossy(&buffer).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        if self.clear_enabled {
            crossterm::execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}
