//! Test helper functions for E2E tests

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Stdio};
use std::thread;

/// Captured outcome of one probe process
pub struct ProbeRun {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the binary with `stdin` as payload and the given extra environment
///
/// `HYDRO_VERIFY_REGEX` and `RUST_LOG` are cleared first so the caller's
/// environment cannot leak into the test.
pub fn run_probe(stdin: &str, envs: &[(&str, &str)], args: &[&str]) -> Result<ProbeRun> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hydro-verify"));
    command
        .args(args)
        .env_remove("HYDRO_VERIFY_REGEX")
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().context("Failed to spawn hydro-verify")?;
    child
        .stdin
        .take()
        .context("Child stdin not captured")?
        .write_all(stdin.as_bytes())
        .context("Failed to write payload")?;

    let output = child
        .wait_with_output()
        .context("Failed to wait for hydro-verify")?;

    Ok(ProbeRun {
        code: output.status.code(),
        stdout: String::from_utf8(output.stdout).context("stdout is not UTF-8")?,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Builds the JSON payload the host sends for a hit on `url`
pub fn payload(url: &str) -> String {
    serde_json::json!({
        "url": url,
        "method": "GET",
        "status_code": 200,
        "content_length": 0,
        "duration_ms": 12,
    })
    .to_string()
}

/// Starts a loopback server answering `connections` requests with `200 OK`
/// and `body`. Returns the base URL.
pub fn serve_body(connections: usize, body: &'static str) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind test server")?;
    let base = format!("http://{}", listener.local_addr()?);

    thread::spawn(move || {
        for stream in listener.incoming().take(connections).flatten() {
            let _ = respond(stream, body);
        }
    });

    Ok(base)
}

fn respond(mut stream: TcpStream, body: &str) -> std::io::Result<()> {
    let mut reader = BufReader::new(&stream);
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
    }

    write!(
        stream,
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

/// A loopback URL on a port nothing is listening on
pub fn closed_port_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind probe port")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/"))
}
