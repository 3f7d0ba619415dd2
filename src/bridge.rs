use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::format::{self, ResultDocument};
use crate::gemini::GeminiClient;

/// Interval at which the UI drains the handoff channel.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Receiving half of the single-slot handoff for one in-flight
/// request. The worker writes exactly once; the UI polls until the
/// value arrives, then drops this.
pub struct Pending {
    rx: mpsc::Receiver<ResultDocument>,
}

impl Pending {
    /// Runs `work` on a fresh worker thread, formats whatever it
    /// returns, and hands the result back through the channel.
    /// Fire-and-forget: no cancellation, no timeout.
    pub fn spawn<F>(work: F) -> Pending
    where
        F: FnOnce() -> String + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        thread::spawn(move || {
            let raw = work();
            // The UI may have shut down; then there is no receiver.
            let _ = tx.send(format::render(&raw));
        });
        Pending { rx }
    }

    /// Non-blocking; yields the formatted result at most once.
    pub fn poll(&self) -> Option<ResultDocument> {
        self.rx.try_recv().ok()
    }
}

/// Starts one generation request. Every failure is converted to a
/// displayable string at the worker boundary so nothing panics
/// through to the UI.
pub fn submit(client: GeminiClient, prompt: String) -> Pending {
    Pending::spawn(move || run_generate(&client, &prompt))
}

fn run_generate(client: &GeminiClient, prompt: &str) -> String {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return format!("요청 처리 중 오류가 발생했습니다: {e}"),
    };

    match runtime.block_on(client.generate(prompt)) {
        Ok(text) => text,
        // Includes the invalid-credential notice, which flows through
        // the same path as a real answer.
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GenerationError;
    use std::time::Instant;

    fn poll_until(pending: &Pending, timeout: Duration) -> Option<ResultDocument> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(doc) = pending.poll() {
                return Some(doc);
            }
            thread::sleep(POLL_INTERVAL / 10);
        }
        None
    }

    #[test]
    fn delivers_formatted_result_exactly_once() {
        let pending = Pending::spawn(|| "추천:\n• 발효\n• 효소".to_string());
        let doc = poll_until(&pending, Duration::from_secs(2)).expect("worker result");
        assert!(doc.html.contains("<li>발효</li>"));
        assert!(!doc.html.contains('•'));

        // the slot is drained; nothing arrives twice
        assert!(pending.poll().is_none());
    }

    #[test]
    fn poll_is_nonblocking_while_worker_runs() {
        let pending = Pending::spawn(|| {
            thread::sleep(Duration::from_millis(200));
            "done".to_string()
        });
        assert!(pending.poll().is_none());

        let doc = poll_until(&pending, Duration::from_secs(2)).expect("worker result");
        assert_eq!(doc.markdown, "> done");
    }

    #[test]
    fn missing_credential_surfaces_fixed_notice() {
        let client = GeminiClient::with_config("gemini-2.0-flash".to_string(), None);
        let pending = submit(client, "발효라는 주제에 대해서 추천해줘.".to_string());
        let doc = poll_until(&pending, Duration::from_secs(2)).expect("worker result");
        assert_eq!(doc.markdown, "> API 키가 유효하지 않습니다.");
    }

    #[test]
    fn worker_failure_becomes_displayable_text() {
        let pending = Pending::spawn(|| {
            GenerationError::Remote {
                status: 500,
                message: "internal".to_string(),
            }
            .to_string()
        });
        let doc = poll_until(&pending, Duration::from_secs(2)).expect("worker result");
        assert!(doc.markdown.contains("500"));
        assert!(doc.html.contains("<blockquote>"));
    }
}
