use std::future::Future;
use std::io;

use super::{ProbeResult, Prober, RunStats};
use crate::config::RunConfig;
use crate::output::OutputSink;

/// Drive one run: `count` sequential probes with `interval` between them.
///
/// Each result is recorded and written as a row before the delay starts.
/// There is no delay after the last probe and lost probes are never retried.
/// The caller renders the summary from the returned stats.
pub async fn run<P, S>(config: &RunConfig, prober: &mut P, sink: &mut S) -> io::Result<RunStats>
where
    P: Prober,
    S: OutputSink + ?Sized,
{
    let mut stats = RunStats::new();

    tracing::info!(
        target_host = %config.target,
        count = config.count,
        interval_ms = config.interval.as_millis() as u64,
        timeout_ms = config.timeout.as_millis() as u64,
        "starting run"
    );

    sink.header()?;

    for attempt in 1..=config.count {
        let latency = prober.probe(config.timeout).await;
        let result = ProbeResult::new(attempt, latency);

        tracing::debug!(
            attempt,
            at = %result.timestamp_str(),
            latency_ms = ?result.latency_ms(),
            "probe finished"
        );

        stats.record(&result);
        sink.row(&result, &config.target)?;

        if attempt < config.count {
            tokio::time::sleep(config.interval).await;
        }
    }

    tracing::info!(
        sent = stats.sent,
        received = stats.received,
        loss = stats.packet_loss(),
        "run complete"
    );

    Ok(stats)
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

/// Run to completion and render the summary, unless `shutdown` resolves
/// first. On shutdown the rows already written stay, the partial statistics
/// are discarded and only the interruption notice is printed.
pub async fn run_until<P, S, F>(
    config: &RunConfig,
    prober: &mut P,
    sink: &mut S,
    shutdown: F,
) -> io::Result<Outcome>
where
    P: Prober,
    S: OutputSink + ?Sized,
    F: Future<Output = ()>,
{
    let finished = tokio::select! {
        stats = run(config, prober, sink) => Some(stats?),
        _ = shutdown => None,
    };

    match finished {
        Some(stats) => {
            sink.summary(&stats)?;
            Ok(Outcome::Completed)
        }
        None => {
            tracing::debug!("interrupted, discarding partial statistics");
            sink.interrupted()?;
            Ok(Outcome::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Replays a fixed list of outcomes, one per probe
    struct ScriptedProber {
        script: VecDeque<Option<Duration>>,
        calls: usize,
        timeouts_seen: Vec<Duration>,
    }

    impl ScriptedProber {
        fn new(script: impl IntoIterator<Item = Option<Duration>>) -> Self {
            Self {
                script: script.into_iter().collect(),
                calls: 0,
                timeouts_seen: Vec::new(),
            }
        }
    }

    impl Prober for ScriptedProber {
        async fn probe(&mut self, timeout: Duration) -> Option<Duration> {
            self.calls += 1;
            self.timeouts_seen.push(timeout);
            let outcome = self.script.pop_front().flatten();
            // A lost probe costs the whole timeout
            tokio::time::sleep(outcome.unwrap_or(timeout)).await;
            outcome
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        headers: usize,
        rows: Vec<(u64, Option<f64>, String)>,
        summaries: usize,
        interruptions: usize,
    }

    impl OutputSink for RecordingSink {
        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn header(&mut self) -> io::Result<()> {
            self.headers += 1;
            Ok(())
        }

        fn row(&mut self, result: &ProbeResult, target: &str) -> io::Result<()> {
            self.rows
                .push((result.attempt, result.latency_ms(), target.to_string()));
            Ok(())
        }

        fn summary(&mut self, _stats: &RunStats) -> io::Result<()> {
            self.summaries += 1;
            Ok(())
        }

        fn interrupted(&mut self) -> io::Result<()> {
            self.interruptions += 1;
            Ok(())
        }

        fn error(&mut self, _message: &str) -> io::Result<()> {
            Ok(())
        }
    }

    fn ms(n: u64) -> Option<Duration> {
        Some(Duration::from_millis(n))
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_probes_succeed() {
        let config = RunConfig::new("10.0.0.1", 5, 100, 200).unwrap();
        let mut prober = ScriptedProber::new([ms(10); 5]);
        let mut sink = RecordingSink::default();

        let start = Instant::now();
        let stats = run(&config, &mut prober, &mut sink).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(prober.calls, 5);
        assert!(prober.timeouts_seen.iter().all(|t| *t == Duration::from_millis(200)));
        assert_eq!(sink.headers, 1);
        assert_eq!(sink.rows.len(), 5);

        assert_eq!(stats.sent, 5);
        assert_eq!(stats.received, 5);
        assert_eq!(stats.packet_loss(), 0.0);
        assert!((stats.avg_latency() - 10.0).abs() < 1e-9);
        assert!((stats.min_latency() - 10.0).abs() < 1e-9);
        assert!((stats.max_latency() - 10.0).abs() < 1e-9);

        // Four delays between five probes, none after the last one
        assert!(elapsed >= Duration::from_millis(5 * 10 + 4 * 100));
        assert!(elapsed < Duration::from_millis(5 * 10 + 5 * 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lost_probe_does_not_abort() {
        let config = RunConfig::new("10.0.0.1", 3, 100, 200).unwrap();
        let mut prober = ScriptedProber::new([ms(5), None, ms(15)]);
        let mut sink = RecordingSink::default();

        let stats = run(&config, &mut prober, &mut sink).await.unwrap();

        assert_eq!(prober.calls, 3);
        assert_eq!(stats.sent, 3);
        assert_eq!(stats.received, 2);
        assert!((stats.packet_loss() - 100.0 / 3.0).abs() < 1e-9);
        assert!((stats.avg_latency() - 10.0).abs() < 1e-9);
        assert!((stats.min_latency() - 5.0).abs() < 1e-9);
        assert!((stats.max_latency() - 15.0).abs() < 1e-9);

        let attempts: Vec<u64> = sink.rows.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(attempts, vec![1, 2, 3]);
        assert_eq!(sink.rows[1].1, None);
        assert!(sink.rows.iter().all(|(_, _, target)| target == "10.0.0.1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_lost() {
        let config = RunConfig::new("10.0.0.1", 4, 50, 100).unwrap();
        let mut prober = ScriptedProber::new([None; 4]);
        let mut sink = RecordingSink::default();

        let stats = run(&config, &mut prober, &mut sink).await.unwrap();

        assert_eq!(stats.sent, 4);
        assert_eq!(stats.received, 0);
        assert_eq!(stats.packet_loss(), 100.0);
        assert_eq!(stats.avg_latency(), 0.0);
        assert_eq!(stats.min_latency(), 0.0);
        assert_eq!(stats.max_latency(), 0.0);
        assert_eq!(sink.rows.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_and_row_counts_match() {
        for count in 1..=7u64 {
            let config = RunConfig::new("10.0.0.1", count, 10, 20).unwrap();
            let script = (0..count).map(|i| if i % 3 == 1 { None } else { ms(i + 1) });
            let mut prober = ScriptedProber::new(script);
            let mut sink = RecordingSink::default();

            let stats = run(&config, &mut prober, &mut sink).await.unwrap();

            assert_eq!(prober.calls as u64, count);
            assert_eq!(sink.rows.len() as u64, count);
            assert_eq!(stats.sent, count);
            assert_eq!(stats.received, (0..count).filter(|i| i % 3 != 1).count() as u64);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_probe_has_no_delay() {
        let config = RunConfig::new("10.0.0.1", 1, 10_000, 200).unwrap();
        let mut prober = ScriptedProber::new([ms(7)]);
        let mut sink = RecordingSink::default();

        let start = Instant::now();
        run(&config, &mut prober, &mut sink).await.unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(7));
        assert!(elapsed < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_mid_run_skips_summary() {
        let config = RunConfig::new("10.0.0.1", 5, 100, 200).unwrap();
        let mut prober = ScriptedProber::new([ms(10); 5]);
        let mut sink = RecordingSink::default();

        // Rows land at ~10, ~120 and ~230 ms; the interrupt comes before the fourth
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let _ = tx.send(());
        });
        let shutdown = async {
            let _ = rx.await;
        };

        let outcome = run_until(&config, &mut prober, &mut sink, shutdown)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Interrupted);
        assert_eq!(sink.rows.len(), 3);
        assert_eq!(prober.calls, 3);
        assert_eq!(sink.interruptions, 1);
        assert_eq!(sink.summaries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_completes_with_summary() {
        let config = RunConfig::new("10.0.0.1", 3, 100, 200).unwrap();
        let mut prober = ScriptedProber::new([ms(5), None, ms(15)]);
        let mut sink = RecordingSink::default();

        let outcome = run_until(&config, &mut prober, &mut sink, std::future::pending())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(sink.rows.len(), 3);
        assert_eq!(sink.summaries, 1);
        assert_eq!(sink.interruptions, 0);
    }
}
