use std::io::{self, Write};

/// Writes help or command output. A closed pipe (`absentee trips | head`)
/// is not an error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_tolerating_closed_pipe(&mut stdout, text.as_bytes())
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');
    write_tolerating_closed_pipe(&mut stdout, line.as_bytes())
}

fn write_tolerating_closed_pipe(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    match writer.write_all(bytes).and_then(|()| writer.flush()) {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
