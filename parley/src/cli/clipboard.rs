//! System clipboard access through the platform's copy command.

use std::io::Write;
use std::process::{Command, Stdio};

pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    #[cfg(target_os = "macos")]
    {
        return pipe_into("pbcopy", &[], text);
    }
    #[cfg(target_os = "windows")]
    {
        return pipe_into("cmd", &["/C", "clip"], text);
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let candidates: [(&str, &[&str]); 3] = [
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ];
        for (program, args) in candidates {
            if pipe_into(program, args, text).is_ok() {
                return Ok(());
            }
        }
        Err("no clipboard command found (install wl-copy, xclip, or xsel)".to_string())
    }
}

fn pipe_into(program: &str, args: &[&str], input: &str) -> Result<(), String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| format!("clipboard command `{program}` not available"))?;

    // stdin is dropped before waiting so the child sees end of input
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait();

    written.map_err(|error| format!("failed to write to `{program}`: {error}"))?;
    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(format!("clipboard command `{program}` failed")),
    }
}
