//! Log output of a forwarded upload.
//!
//! Kept in its own test binary: it installs the global subscriber.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use upload_gateway::config::ObservabilityConfig;
use upload_gateway::observability::logging::default_filter;

mod common;

use common::{client, gateway_config, start_gateway, TOKEN};

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_upload_logs_client_and_never_token() {
    let logs = CapturedLogs::default();
    let observability = ObservabilityConfig {
        log_level: "debug".to_string(),
        ..ObservabilityConfig::default()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_filter(&observability)))
        .with_writer(logs.clone())
        .with_ansi(false)
        .init();

    let upstream = common::start_echo_upstream().await;
    let (proxy, shutdown) = start_gateway(gateway_config(&format!("http://{upstream}/api"))).await;

    let res = client()
        .post(format!("http://{proxy}/upload"))
        .header("authorization", "Bearer client-supplied")
        .body("file bytes")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    // The echo upstream reflects the outbound token in its body.
    assert!(res.text().await.unwrap().contains(TOKEN));

    shutdown.trigger();

    let output = logs.contents();
    let upload_lines: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("Uploaded a file"))
        .collect();
    assert_eq!(upload_lines.len(), 1, "logs:\n{output}");
    assert!(upload_lines[0].contains("client=127.0.0.1:"), "line: {}", upload_lines[0]);
    assert!(output.contains("Forwarding to upstream"), "logs:\n{output}");
    assert!(!output.contains(TOKEN), "token leaked into logs:\n{output}");
}
