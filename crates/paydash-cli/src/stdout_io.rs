use std::io::{self, Write};

/// Writes `text` plus a newline. A reader that closed the pipe early
/// (`paydash transactions export | head`) is not an error.
pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_line_to(&mut stdout, text)
}

fn write_line_to(writer: &mut dyn Write, text: &str) -> io::Result<()> {
    tolerate_broken_pipe(writer.write_all(text.as_bytes()))?;
    tolerate_broken_pipe(writer.write_all(b"\n"))?;
    tolerate_broken_pipe(writer.flush())
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
