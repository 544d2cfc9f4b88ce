// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Interactive session state machine

use crate::client::InferenceClient;
use crate::error::{AgentError, Result};
use neuroview_ink::{normalize, CanvasConfig, CanvasPoint, InkCanvas, NormalizedInput, NormalizerConfig};
use neuroview_scene::{compose_frame, LayoutCache, LayoutConfig, PruneConfig, RenderConfig, SceneFrame};
use neuroview_structures::activations::ActivationSnapshot;
use neuroview_structures::NeuroviewError;
use tracing::{info, warn};

/// Everything a session needs besides the service connection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSettings {
    pub canvas: CanvasConfig,
    pub normalizer: NormalizerConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub prune: PruneConfig,
}

impl SessionSettings {
    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        self.normalizer.validate()?;
        self.layout.validate()?;
        self.render.validate()?;
        self.prune.validate()?;
        Ok(())
    }
}

/// One dispatched prediction: the normalized pixels plus the sequence
/// number that decides whether its eventual response still matters.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    sequence: u64,
    pixels: NormalizedInput,
}

impl PredictionRequest {
    /// Sequence number this request was issued under.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The normalized input to send.
    pub fn pixels(&self) -> &NormalizedInput {
        &self.pixels
    }
}

/// One user's interactive visualization session.
///
/// Owns the drawing canvas, the layout cache, and the current snapshot and
/// scene frame. All state changes happen synchronously from events; the
/// only suspension point is the network round-trip, which is sequenced so
/// that a response arriving after a newer dispatch or after a clear is
/// discarded instead of overwriting fresher state.
///
/// The split-phase API ([`Session::begin_prediction`],
/// [`Session::complete_prediction`], [`Session::abort_prediction`]) exists
/// for event loops that own the transport themselves;
/// [`Session::predict_stroke`] drives all three for the common case.
pub struct Session {
    canvas: InkCanvas,
    brush_radius: f32,
    client: InferenceClient,
    normalizer_config: NormalizerConfig,
    render_config: RenderConfig,
    prune_config: PruneConfig,
    layout: LayoutCache,
    snapshot: Option<ActivationSnapshot>,
    frame: Option<SceneFrame>,
    /// Advances on every dispatch and every clear; responses tagged with
    /// anything older are stale.
    sequence: u64,
    in_flight: Option<u64>,
}

impl Session {
    /// Creates a fresh session over a validated settings block.
    pub fn new(settings: &SessionSettings, client: InferenceClient) -> Result<Session> {
        settings.validate()?;
        Ok(Session {
            canvas: InkCanvas::new_from_config(&settings.canvas)?,
            brush_radius: settings.canvas.brush_radius,
            client,
            normalizer_config: settings.normalizer,
            render_config: settings.render,
            prune_config: settings.prune,
            layout: LayoutCache::new(settings.layout),
            snapshot: None,
            frame: None,
            sequence: 0,
            in_flight: None,
        })
    }

    //region Drawing

    /// Stamps one pointer-path segment with the session brush.
    pub fn draw_segment(&mut self, from: CanvasPoint, to: CanvasPoint) {
        self.canvas.stamp_segment(from, to, self.brush_radius);
    }

    /// Stamps a single brush dot (a click without movement).
    pub fn draw_dot(&mut self, at: CanvasPoint) {
        self.canvas.stamp_dot(at, self.brush_radius);
    }

    /// Borrows the canvas, for embeddings that display the raw raster.
    pub fn canvas(&self) -> &InkCanvas {
        &self.canvas
    }

    //endregion

    //region Prediction lifecycle

    /// Normalizes the canvas and issues a sequenced prediction request.
    ///
    /// Refuses with [`AgentError::RequestInFlight`] while an earlier request
    /// is outstanding, and with [`AgentError::NothingDrawn`] when the canvas
    /// holds no ink; in both cases no request leaves the session and the
    /// current visuals stay as they are.
    pub fn begin_prediction(&mut self) -> Result<PredictionRequest> {
        if let Some(sequence) = self.in_flight {
            return Err(AgentError::RequestInFlight { sequence });
        }
        let pixels = match normalize(&self.canvas, &self.normalizer_config) {
            Ok(pixels) => pixels,
            Err(NeuroviewError::NoInk) => return Err(AgentError::NothingDrawn),
            Err(other) => return Err(AgentError::Data(other)),
        };
        self.sequence += 1;
        self.in_flight = Some(self.sequence);
        info!("[SESSION] Dispatching prediction request {}", self.sequence);
        Ok(PredictionRequest {
            sequence: self.sequence,
            pixels,
        })
    }

    /// Applies a completed response, unless it has gone stale.
    ///
    /// A response is stale when its request was superseded by a newer
    /// dispatch or wiped by a clear; stale responses are discarded and the
    /// current visuals survive untouched.
    pub fn complete_prediction(
        &mut self,
        sequence: u64,
        snapshot: ActivationSnapshot,
    ) -> Result<&SceneFrame> {
        if self.in_flight != Some(sequence) {
            warn!(
                "[SESSION] Discarding stale response for request {} (session at {})",
                sequence, self.sequence
            );
            return Err(AgentError::StaleResponse {
                arrived: sequence,
                current: self.sequence,
            });
        }
        self.in_flight = None;
        let frame = compose_frame(
            &snapshot,
            &mut self.layout,
            &self.render_config,
            &self.prune_config,
        );
        info!(
            "[SESSION] Applied snapshot {}: prediction {} at {:.1}% confidence",
            sequence,
            snapshot.prediction(),
            snapshot.confidence() * 100.0
        );
        self.snapshot = Some(snapshot);
        Ok(self.frame.insert(frame))
    }

    /// Releases the in-flight slot after a failed round-trip.
    ///
    /// The prior snapshot and frame are preserved; the failure is the
    /// caller's to report.
    pub fn abort_prediction(&mut self, sequence: u64) {
        if self.in_flight == Some(sequence) {
            warn!("[SESSION] Prediction request {} failed, keeping prior visuals", sequence);
            self.in_flight = None;
        }
    }

    /// Runs one full prediction round-trip for the current canvas.
    pub async fn predict_stroke(&mut self) -> Result<&SceneFrame> {
        let request = self.begin_prediction()?;
        match self.client.predict(request.pixels()).await {
            Ok(snapshot) => self.complete_prediction(request.sequence(), snapshot),
            Err(failure) => {
                self.abort_prediction(request.sequence());
                Err(failure)
            }
        }
    }

    //endregion

    //region Clearing and feedback

    /// Wipes the canvas and all visuals immediately.
    ///
    /// Advances the sequence so a response still in flight is discarded as
    /// stale when it eventually arrives.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.snapshot = None;
        self.frame = None;
        self.sequence += 1;
        self.in_flight = None;
        info!("[SESSION] Cleared canvas and visuals (sequence now {})", self.sequence);
    }

    /// Reports the correct label for the currently drawn stroke.
    ///
    /// Failures (no ink, transport) are returned to the caller and never
    /// alter the current visualization.
    pub async fn submit_feedback(&self, correct_label: u8) -> Result<()> {
        let pixels = match normalize(&self.canvas, &self.normalizer_config) {
            Ok(pixels) => pixels,
            Err(NeuroviewError::NoInk) => return Err(AgentError::NothingDrawn),
            Err(other) => return Err(AgentError::Data(other)),
        };
        self.client.submit_feedback(&pixels, correct_label).await
    }

    //endregion

    //region State accessors

    /// The most recent scene frame, if any prediction has been applied.
    pub fn current_frame(&self) -> Option<&SceneFrame> {
        self.frame.as_ref()
    }

    /// The most recent activation snapshot, if any.
    pub fn current_snapshot(&self) -> Option<&ActivationSnapshot> {
        self.snapshot.as_ref()
    }

    /// True while a prediction round-trip is outstanding.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current sequence number (advances on dispatch and clear).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    //endregion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ServiceConfig;

    fn test_session() -> Session {
        let client =
            InferenceClient::new(&ServiceConfig::default()).expect("Client should build");
        Session::new(&SessionSettings::default(), client).expect("Session should build")
    }

    fn fixture_snapshot() -> ActivationSnapshot {
        let response = serde_json::json!({
            "input_layer": [0.0, 1.0, 0.0, 0.9],
            "hidden_layer1": [0.9, 0.05, 0.5, 0.01],
            "output_layer": [0.2, 0.9, 0.1],
            "prediction": 1,
            "confidence": 0.9,
        });
        ActivationSnapshot::new_from_response_json(&response).expect("Fixture should decode")
    }

    #[test]
    fn test_blank_canvas_refuses_to_dispatch() {
        let mut session = test_session();
        assert!(matches!(
            session.begin_prediction(),
            Err(AgentError::NothingDrawn)
        ));
        assert!(!session.has_request_in_flight());
    }

    #[test]
    fn test_duplicate_dispatch_is_refused() {
        let mut session = test_session();
        session.draw_dot(CanvasPoint::new(140.0, 140.0));
        let first = session.begin_prediction().expect("First dispatch should go out");
        let second = session.begin_prediction();
        assert!(matches!(
            second,
            Err(AgentError::RequestInFlight { sequence }) if sequence == first.sequence()
        ));
    }

    #[test]
    fn test_completion_applies_frame() {
        let mut session = test_session();
        session.draw_dot(CanvasPoint::new(140.0, 140.0));
        let request = session.begin_prediction().expect("Dispatch should go out");
        let frame = session
            .complete_prediction(request.sequence(), fixture_snapshot())
            .expect("Matching sequence should apply");
        assert_eq!(frame.layers().len(), 3);
        assert!(!session.has_request_in_flight());
        assert!(session.current_snapshot().is_some());
    }

    #[test]
    fn test_clear_makes_inflight_response_stale() {
        let mut session = test_session();
        session.draw_dot(CanvasPoint::new(140.0, 140.0));
        let request = session.begin_prediction().expect("Dispatch should go out");

        session.clear();
        let result = session.complete_prediction(request.sequence(), fixture_snapshot());
        assert!(matches!(result, Err(AgentError::StaleResponse { .. })));
        assert!(session.current_frame().is_none());
        assert!(session.current_snapshot().is_none());
    }

    #[test]
    fn test_newer_dispatch_supersedes_older_response() {
        let mut session = test_session();
        session.draw_dot(CanvasPoint::new(140.0, 140.0));
        let old_request = session.begin_prediction().expect("Dispatch should go out");

        // The old round-trip fails over, a new stroke dispatches
        session.abort_prediction(old_request.sequence());
        session.draw_dot(CanvasPoint::new(100.0, 100.0));
        let new_request = session.begin_prediction().expect("Redispatch should go out");

        // The old response straggles in anyway and must be discarded
        let stale = session.complete_prediction(old_request.sequence(), fixture_snapshot());
        assert!(matches!(stale, Err(AgentError::StaleResponse { .. })));

        let applied = session.complete_prediction(new_request.sequence(), fixture_snapshot());
        assert!(applied.is_ok());
    }

    #[test]
    fn test_abort_preserves_prior_frame() {
        let mut session = test_session();
        session.draw_dot(CanvasPoint::new(140.0, 140.0));
        let request = session.begin_prediction().expect("Dispatch should go out");
        session
            .complete_prediction(request.sequence(), fixture_snapshot())
            .expect("Should apply");

        let request = session.begin_prediction().expect("Second dispatch should go out");
        session.abort_prediction(request.sequence());
        assert!(session.current_frame().is_some());
        assert!(!session.has_request_in_flight());
    }

    #[tokio::test]
    async fn test_transport_failure_is_nonfatal() {
        // Nothing listens on the discard port, so the round-trip fails fast
        let config = ServiceConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1.0,
            ..ServiceConfig::default()
        };
        let client = InferenceClient::new(&config).expect("Client should build");
        let mut session =
            Session::new(&SessionSettings::default(), client).expect("Session should build");
        session.draw_dot(CanvasPoint::new(140.0, 140.0));

        let result = session.predict_stroke().await;
        assert!(matches!(result, Err(AgentError::Transport(_))));
        assert!(!session.has_request_in_flight());
        assert!(session.current_frame().is_none());
    }

    #[tokio::test]
    async fn test_feedback_requires_ink() {
        let session = test_session();
        let result = session.submit_feedback(7).await;
        assert!(matches!(result, Err(AgentError::NothingDrawn)));
    }
}
