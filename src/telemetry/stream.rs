//! Live WebSocket telemetry with automatic reconnect.

use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio_retry::strategy::{ExponentialBackoff, FixedInterval};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_util::sync::CancellationToken;

use super::message::{parse_frame, BandwidthSample, TelemetryMessage};
use super::smoother::{BandwidthPoint, BandwidthSmoother};
use crate::config::{ReconnectMode, RECONNECT_DELAY, RECONNECT_FACTOR, RECONNECT_MAX_DELAY_SECS};
use crate::error_handling::TelemetryError;
use crate::network::DeviceSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Reconnecting,
    Error,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::Error => "error",
        }
    }
}

/// Emitted by `BandwidthStream::run`.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    State(ConnectionState),
    Bandwidth {
        point: BandwidthPoint,
        sample: BandwidthSample,
    },
    Devices(DeviceSnapshot),
}

/// Delay schedule between reconnect attempts. Attempts are unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconnectPolicy {
    Fixed(Duration),
    /// Doubles from `initial` up to `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy::Fixed(RECONNECT_DELAY)
    }
}

impl From<ReconnectMode> for ReconnectPolicy {
    fn from(mode: ReconnectMode) -> Self {
        match mode {
            ReconnectMode::Fixed => ReconnectPolicy::Fixed(RECONNECT_DELAY),
            ReconnectMode::Exponential => ReconnectPolicy::Exponential {
                initial: RECONNECT_DELAY,
                max: Duration::from_secs(RECONNECT_MAX_DELAY_SECS),
            },
        }
    }
}

impl ReconnectPolicy {
    /// A fresh delay sequence. Restarted after every successful connect.
    pub fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        match *self {
            ReconnectPolicy::Fixed(delay) => Box::new(FixedInterval::new(delay)),
            ReconnectPolicy::Exponential { initial, max } => {
                // ExponentialBackoff yields base^n * factor; with base 2 the
                // first delay is 2 * factor.
                let factor = (initial.as_millis() as u64 / RECONNECT_FACTOR).max(1);
                Box::new(
                    ExponentialBackoff::from_millis(RECONNECT_FACTOR)
                        .factor(factor)
                        .max_delay(max),
                )
            }
        }
    }
}

/// Consumes the live channel and keeps the smoothed bandwidth window.
pub struct BandwidthStream {
    url: String,
    policy: ReconnectPolicy,
    smoother: BandwidthSmoother,
}

impl BandwidthStream {
    pub fn new(url: impl Into<String>, policy: ReconnectPolicy) -> Self {
        Self {
            url: url.into(),
            policy,
            smoother: BandwidthSmoother::new(),
        }
    }

    pub fn smoother(&self) -> &BandwidthSmoother {
        &self.smoother
    }

    /// Applies one text frame. Unknown or malformed frames are ignored.
    pub fn handle_frame(&mut self, text: &str) -> Option<StreamEvent> {
        match parse_frame(text)? {
            TelemetryMessage::Bandwidth(sample) => {
                let point = self.smoother.push(sample.clone()).clone();
                Some(StreamEvent::Bandwidth { point, sample })
            }
            TelemetryMessage::DeviceUpdate(snapshot) => Some(StreamEvent::Devices(snapshot)),
        }
    }

    /// Reads frames until the peer goes away or `cancel` fires.
    ///
    /// Returns `Ok` only on cancellation; a close or transport error is
    /// returned so the caller can reconnect.
    pub async fn consume<S>(
        &mut self,
        stream: &mut S,
        events: &UnboundedSender<StreamEvent>,
        cancel: &CancellationToken,
    ) -> Result<(), TelemetryError>
    where
        S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    {
        loop {
            let message = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                message = stream.next() => message,
            };
            let event = match message {
                None | Some(Ok(Message::Close(_))) => return Err(TelemetryError::Closed),
                Some(Err(e)) => return Err(e.into()),
                Some(Ok(Message::Text(text))) => self.handle_frame(&text),
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => self.handle_frame(&text),
                    Err(_) => None,
                },
                Some(Ok(_)) => None,
            };
            if let Some(event) = event {
                let _ = events.send(event);
            }
        }
    }

    /// Connects and streams until `cancel` fires, reconnecting on any
    /// failure. Returns the final smoothing window.
    pub async fn run(
        mut self,
        events: UnboundedSender<StreamEvent>,
        cancel: CancellationToken,
    ) -> BandwidthSmoother {
        let emit = |state: ConnectionState| {
            log::debug!("Telemetry connection {}", state.as_str());
            let _ = events.send(StreamEvent::State(state));
        };
        let mut delays = self.policy.delays();

        loop {
            emit(ConnectionState::Connecting);
            let connected = tokio::select! {
                _ = cancel.cancelled() => break,
                result = tokio_tungstenite::connect_async(self.url.as_str()) => result,
            };

            match connected {
                Ok((mut socket, _)) => {
                    log::info!("Connected to telemetry at {}", self.url);
                    emit(ConnectionState::Connected);
                    delays = self.policy.delays();
                    match self.consume(&mut socket, &events, &cancel).await {
                        Ok(()) => {
                            let _ = socket.close(None).await;
                            break;
                        }
                        Err(e) => log::warn!("Telemetry connection lost: {e}"),
                    }
                }
                Err(e) => {
                    log::warn!("Telemetry connection to {} failed: {e}", self.url);
                    emit(ConnectionState::Error);
                }
            }

            let delay = delays.next().unwrap_or(RECONNECT_DELAY);
            emit(ConnectionState::Reconnecting);
            log::info!("Reconnecting to telemetry in {}s", delay.as_secs_f64());
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        self.smoother
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_fixed_policy_repeats_delay() {
        let delays: Vec<_> = ReconnectPolicy::default().delays().take(3).collect();
        assert_eq!(delays, vec![Duration::from_secs(3); 3]);
    }

    #[test]
    fn test_exponential_policy_doubles_and_caps() {
        let policy = ReconnectPolicy::from(ReconnectMode::Exponential);
        let delays: Vec<_> = policy.delays().take(7).map(|d| d.as_secs()).collect();
        assert_eq!(delays, vec![3, 6, 12, 24, 48, 60, 60]);
    }

    #[test]
    fn test_handle_frame_routes_messages() {
        let mut stream = BandwidthStream::new("ws://localhost:1", ReconnectPolicy::default());
        let event = stream.handle_frame(
            r#"{"type":"bandwidth","data":{"timestamp":"2024-05-01T12:00:00Z","downloadSpeed":2048,"uploadSpeed":1024}}"#,
        );
        match event {
            Some(StreamEvent::Bandwidth { point, .. }) => {
                assert_eq!(point.download_kbps, 2);
                assert_eq!(point.upload_kbps, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(stream.smoother().len(), 1);
        assert!(stream.handle_frame("garbage").is_none());
        assert_eq!(stream.smoother().len(), 1);
    }

    #[tokio::test]
    async fn test_consume_skips_bad_frames_and_reports_close() {
        let frames = vec![
            Ok(Message::Text("not json".into())),
            Ok(Message::Text(
                r#"{"type":"bandwidth","data":{"timestamp":0,"downloadSpeed":10240,"uploadSpeed":0}}"#
                    .into(),
            )),
            Ok(Message::Close(None)),
        ];
        let mut source = futures::stream::iter(frames);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut stream = BandwidthStream::new("ws://localhost:1", ReconnectPolicy::default());

        let result = stream
            .consume(&mut source, &tx, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(TelemetryError::Closed)));
        assert!(matches!(
            rx.try_recv(),
            Ok(StreamEvent::Bandwidth { .. })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_run_stops_when_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (tx, _rx) = mpsc::unbounded_channel();
        let stream = BandwidthStream::new("ws://127.0.0.1:9", ReconnectPolicy::default());
        let smoother = stream.run(tx, cancel).await;
        assert!(smoother.is_empty());
    }
}
