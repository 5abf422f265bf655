//! JSON output for the CLI
//!
//! One JSON object per command on stdout, UTF-8, newline terminated.
//! Logs go to stderr and never interleave with it.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_response_to(&mut out, data)
}

pub fn write_response_to<W: Write, T: Serialize>(out: &mut W, data: &T) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(out, &response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_error_to(&mut out, code, message)
}

pub fn write_error_to<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(out, &response)
}

fn write_line<W: Write>(out: &mut W, value: &serde_json::Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_response_envelope() {
        let mut buf = Vec::new();
        write_response_to(&mut buf, &vec![1, 2]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"], json!([1, 2]));
    }

    #[test]
    fn test_error_envelope() {
        let mut buf = Vec::new();
        write_error_to(&mut buf, "VGS_DATA_FILE_MISSING", "no such file").unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "VGS_DATA_FILE_MISSING");
        assert_eq!(value["message"], "no such file");
    }
}
